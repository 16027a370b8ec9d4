//! Admin actions on user accounts.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user;
use super::types::UserDto;
use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(alias = "username")]
    pub usuario: String,
    #[serde(alias = "password")]
    pub senha: String,
}

/// GET /api/usuarios
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.auth_service().list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /api/usuarios
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .auth_service()
        .create_user(&payload.usuario, &payload.senha)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

/// DELETE /api/usuarios/{username}
/// The logged-in user cannot delete itself.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let acting = require_user(&session).await?;
    state.auth_service().delete_user(&acting, &username).await?;
    Ok(Json(ApiResponse::success(())))
}
