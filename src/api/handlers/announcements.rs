use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{
        Announcement, Category, CreateAnnouncementRequest, FeedFilter, Priority, Role,
        UpdateAnnouncementRequest,
    },
    error::{AppError, Result},
    feed::{FeedErrorKind, LoadMore, Pager, ScrollOptions, ScrollWindow},
};

const FEED_UNAVAILABLE: &str = "Announcement feed is temporarily unavailable";

/// Filter parameters shared by the feed endpoints. The search text rides
/// in `q`, the same URL parameter that drives navigation in the client;
/// each request re-derives the filter from scratch, so stale filters
/// cannot survive a navigation change.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQueryParams {
    pub category: Option<Category>,
    pub department: Option<String>,
    pub priority: Option<Priority>,
    /// Free-text search across title, excerpt and content.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FeedQueryParams {
    fn into_filter(self) -> FeedFilter {
        FeedFilter {
            category: self.category,
            department: self.department,
            priority: self.priority,
            search: self.q,
            limit: self.limit,
            offset: self.offset,
        }
        .normalized()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrollParams {
    pub category: Option<Category>,
    pub department: Option<String>,
    pub priority: Option<Priority>,
    pub q: Option<String>,
    /// Items per materialized page; defaults from configuration.
    pub page_size: Option<usize>,
    /// How many pages deep the window is materialized.
    pub pages: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub category: Option<Category>,
    pub department: Option<String>,
    pub priority: Option<Priority>,
    pub q: Option<String>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScrollResponse {
    pub items: Vec<Announcement>,
    pub page: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse {
    pub items: Vec<Announcement>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

fn filter_without_pagination(
    category: Option<Category>,
    department: Option<String>,
    priority: Option<Priority>,
    q: Option<String>,
) -> FeedFilter {
    FeedFilter {
        category,
        department,
        priority,
        search: q,
        limit: None,
        offset: None,
    }
    .normalized()
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    params(FeedQueryParams),
    responses(
        (status = 200, description = "Announcements matching the filter, newest first", body = [Announcement]),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FeedQueryParams>,
) -> Result<Json<Vec<Announcement>>> {
    let filter = params.into_filter();
    let batch = state.service_context.feed.fetch(&filter).await;

    match batch.items {
        Some(items) => Ok(Json(items)),
        None => Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/api/announcements/scroll",
    params(ScrollParams),
    responses(
        (status = 200, description = "Infinite-scroll window materialized to the requested depth", body = ScrollResponse),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn scroll(
    State(state): State<AppState>,
    Query(params): Query<ScrollParams>,
) -> Result<Json<ScrollResponse>> {
    let feed_config = &state.settings.feed;
    let page_size = params
        .page_size
        .unwrap_or(feed_config.page_size)
        .clamp(1, feed_config.max_page_size);
    let pages = params.pages.unwrap_or(1).max(1);

    let filter =
        filter_without_pagination(params.category, params.department, params.priority, params.q);
    let batch = state.service_context.feed.fetch(&filter).await;
    let Some(items) = batch.items else {
        return Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string()));
    };

    // Server-side materialization skips the visual-feedback delay; the
    // interactive default only matters to embedding views.
    let window = ScrollWindow::with_options(
        items,
        page_size,
        ScrollOptions {
            load_delay: Duration::ZERO,
            ..ScrollOptions::default()
        },
    );
    for _ in 1..pages {
        if window.load_more().await == LoadMore::Skipped {
            break;
        }
    }

    Ok(Json(ScrollResponse {
        items: window.displayed().await,
        page: window.page().await,
        has_more: window.has_more().await,
    }))
}

#[utoipa::path(
    get,
    path = "/api/announcements/pages",
    params(PageParams),
    responses(
        (status = 200, description = "One discrete page of the filtered feed", body = PagedResponse),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn pages(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResponse>> {
    let feed_config = &state.settings.feed;
    let page_size = params
        .page_size
        .unwrap_or(feed_config.page_size)
        .clamp(1, feed_config.max_page_size);

    let filter =
        filter_without_pagination(params.category, params.department, params.priority, params.q);
    let batch = state.service_context.feed.fetch(&filter).await;
    let Some(items) = batch.items else {
        return Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string()));
    };

    let mut pager = Pager::new(items, page_size);
    pager.go_to_page(params.page.unwrap_or(1));

    Ok(Json(PagedResponse {
        items: pager.current_items().to_vec(),
        page: pager.current_page(),
        total_pages: pager.total_pages(),
        total: pager.total_items(),
        has_next: pager.has_next_page(),
        has_prev: pager.has_prev_page(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/announcements/count",
    params(FeedQueryParams),
    responses(
        (status = 200, description = "Exact total for the filter, for UI messaging", body = CountResponse),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<FeedQueryParams>,
) -> Result<Json<CountResponse>> {
    let filter = params.into_filter();
    let outcome = state.service_context.feed.count(&filter).await;

    if outcome.error.is_some() {
        return Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string()));
    }

    Ok(Json(CountResponse {
        count: outcome.count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "The announcement", body = Announcement),
        (status = 404, description = "Unknown or deleted announcement"),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let single = state.service_context.feed.fetch_one(id).await;

    match (single.item, single.error) {
        (Some(announcement), _) => {
            // Record the view off the response path; a failed increment is
            // silent and never delays rendering.
            let view_counts = state.service_context.view_counts.clone();
            tokio::spawn(async move {
                view_counts.record_view(id).await;
            });

            Ok(Json(announcement))
        }
        (None, Some(FeedErrorKind::Backend)) => {
            Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string()))
        }
        (None, _) => Err(AppError::NotFound("Announcement not found".to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/api/announcements/{id}/related",
    params(
        ("id" = Uuid, Path, description = "Announcement id"),
        RelatedParams
    ),
    responses(
        (status = 200, description = "Other announcements sharing the category or department", body = [Announcement]),
        (status = 404, description = "Unknown or deleted announcement"),
        (status = 503, description = "Feed backend unavailable")
    ),
    tag = "announcements"
)]
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Vec<Announcement>>> {
    let single = state.service_context.feed.fetch_one(id).await;
    let announcement = match (single.item, single.error) {
        (Some(announcement), _) => announcement,
        (None, Some(FeedErrorKind::Backend)) => {
            return Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string()))
        }
        (None, _) => return Err(AppError::NotFound("Announcement not found".to_string())),
    };

    let batch = state
        .service_context
        .feed
        .related(
            id,
            announcement.category,
            &announcement.department,
            params.limit,
        )
        .await;

    match batch.items {
        Some(items) => Ok(Json(items)),
        None => Err(AppError::ServiceUnavailable(FEED_UNAVAILABLE.to_string())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    request.validate()?;

    let announcement = Announcement {
        id: Uuid::new_v4(),
        title: request.title,
        excerpt: request.excerpt,
        content: request.content,
        category: request.category,
        department: request.department,
        priority: request.priority,
        author_id: user.user.id,
        author: None,
        image_url: request.image_url,
        published_at: Utc::now(),
        view_count: 0,
        is_deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let created = state
        .service_context
        .announcement_repo
        .create(announcement)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    request.validate()?;

    let mut announcement = state
        .service_context
        .announcement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    // Only the author or an admin may edit
    if announcement.author_id != user.user.id && user.user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    if let Some(title) = request.title {
        announcement.title = title;
    }
    if let Some(excerpt) = request.excerpt {
        announcement.excerpt = excerpt;
    }
    if let Some(content) = request.content {
        announcement.content = content;
    }
    if let Some(category) = request.category {
        announcement.category = category;
    }
    if let Some(department) = request.department {
        announcement.department = department;
    }
    if let Some(priority) = request.priority {
        announcement.priority = priority;
    }
    if let Some(image_url) = request.image_url {
        announcement.image_url = Some(image_url);
    }

    announcement.updated_at = Utc::now();

    let updated = state
        .service_context
        .announcement_repo
        .update(id, announcement)
        .await?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode> {
    let announcement = state
        .service_context
        .announcement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    if announcement.author_id != user.user.id && user.user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    // Soft delete: the row stays, every read path skips it from now on.
    state
        .service_context
        .announcement_repo
        .soft_delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
