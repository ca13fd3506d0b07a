pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Settings,
    domain::{Announcement, Author, Category, Priority},
    feed::FeedStatsPoller,
    service::ServiceContext,
};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::announcements::list,
        handlers::announcements::scroll,
        handlers::announcements::pages,
        handlers::announcements::count,
        handlers::announcements::get,
        handlers::announcements::related,
    ),
    components(schemas(
        Announcement,
        Author,
        Category,
        Priority,
        handlers::announcements::ScrollResponse,
        handlers::announcements::PagedResponse,
        handlers::announcements::CountResponse,
    )),
    tags((name = "announcements", description = "Campus announcement feed"))
)]
struct ApiDoc;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    stats: Arc<FeedStatsPoller>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, stats, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))
        .route("/api/stats", get(handlers::root::stats))
        // API routes
        .nest("/api/announcements", announcement_routes(app_state.clone()))
        .nest("/api/users", user_routes(app_state.clone()))
        // Admin routes
        .nest("/admin", admin_routes(app_state.clone()))
        // API documentation
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn announcement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public routes (the upstream gateway has already authenticated)
        .route("/", get(handlers::announcements::list))
        .route("/scroll", get(handlers::announcements::scroll))
        .route("/pages", get(handlers::announcements::pages))
        .route("/count", get(handlers::announcements::count))
        .route("/:id", get(handlers::announcements::get))
        .route("/:id/related", get(handlers::announcements::related))
        // Protected routes - posting and moderation are for staff
        .merge(
            Router::new()
                .route("/", post(handlers::announcements::create))
                .route("/:id", put(handlers::announcements::update))
                .route("/:id", delete(handlers::announcements::delete))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_staff,
                )),
        )
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::users::list))
        .route(
            "/stats",
            get(handlers::users::stats).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::auth::require_admin,
            )),
        )
        .route("/:id", get(handlers::users::get_profile))
        .route(
            "/:id",
            put(handlers::users::update_profile).layer(axum::middleware::from_fn_with_state(
                state,
                middleware::auth::require_auth,
            )),
        )
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/settings", get(handlers::settings::list_settings))
        .route("/settings/:key", put(handlers::settings::update_setting))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}
