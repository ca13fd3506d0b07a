use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Role, UpdateProfileRequest, UserProfile, UserQuery, UserStats},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
    pub department: Option<String>,
    /// Matches name or email, case-insensitively.
    pub q: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>> {
    let user = state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>> {
    request.validate()?;

    if current.user.id != id && current.user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    let mut user = state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    if let Some(first_name) = request.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(last_name) = request.last_name {
        user.last_name = Some(last_name);
    }
    if let Some(department) = request.department {
        user.department = department;
    }
    if let Some(level) = request.level {
        user.level = Some(level);
    }
    if let Some(avatar) = request.avatar {
        user.avatar = Some(avatar);
    }

    // The display name is denormalized from the name parts.
    let display_name = format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or(""),
        user.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    if !display_name.is_empty() {
        user.name = display_name;
    }

    user.updated_at = Utc::now();

    let updated = state.service_context.user_repo.update(id, user).await?;

    Ok(Json(updated))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserProfile>>> {
    let query = UserQuery {
        role: params.role,
        department: params.department,
        search: params.q,
        limit: params.limit,
    };

    let users = state.service_context.user_repo.list(&query).await?;

    Ok(Json(users))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<UserStats>> {
    let stats = state.service_context.user_repo.stats().await?;

    Ok(Json(stats))
}
