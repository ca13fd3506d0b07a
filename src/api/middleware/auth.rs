use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Role, UserProfile},
    error::AppError,
};

/// Identity arrives from the upstream gateway, which terminates the actual
/// session. The service only resolves the forwarded id to a profile.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
pub struct CurrentUser {
    pub user: UserProfile,
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<UserProfile, AppError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    let id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;

    state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, request.headers()).await?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

pub async fn require_staff(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, request.headers()).await?;

    if !user.role.is_staff() {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, request.headers()).await?;

    if user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}
