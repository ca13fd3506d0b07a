use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{api::state::AppState, error::Result};

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: String,
}

pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>> {
    Ok(Json(state.service_context.settings_service.all().await))
}

pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpdateSettingRequest>,
) -> Result<Json<SettingResponse>> {
    state
        .service_context
        .settings_service
        .set(&key, &request.value)
        .await?;

    Ok(Json(SettingResponse {
        key,
        value: request.value,
    }))
}
