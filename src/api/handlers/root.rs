use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::{api::state::AppState, error::Result, feed::FeedStats};

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Herald API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Campus announcement feed service",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "announcements": "/api/announcements",
            "docs": "/api/docs"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Herald API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Campus announcement feed service".to_string(),
        status: "operational".to_string(),
    })
}

/// Latest value published by the background feed stats poller.
pub async fn stats(State(state): State<AppState>) -> Result<Json<FeedStats>> {
    Ok(Json(state.stats.latest()))
}
