//! Dashboard page, API-key setting and the search page entry point.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user;
use super::types::DashboardDto;
use super::{ApiError, ApiResponse, AppState, pages};

#[derive(Debug, Deserialize)]
pub struct ApiKeyForm {
    pub tmdb_key: Option<String>,
}

/// GET /dashboard
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, ApiError> {
    let username = require_user(&session).await?;
    let stats = state.catalog_service().dashboard().await?;
    let key = state.keys().get().await;

    Ok(pages::dashboard(&username, &stats, key.as_deref()).into_response())
}

/// POST /dashboard
/// Stores `tmdb_key` when present; always returns to the dashboard.
pub async fn save_api_key(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ApiKeyForm>,
) -> Result<Redirect, ApiError> {
    if let Some(key) = form.tmdb_key {
        state
            .keys()
            .set(&key)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to save API key: {e}")))?;
    }
    Ok(Redirect::to("/dashboard"))
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let stats = state.catalog_service().dashboard().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// GET /add_conteudo
/// Without an API key there is nothing to search, so the user is sent back.
pub async fn add_content_page(State(state): State<Arc<AppState>>) -> Response {
    if state.keys().is_configured().await {
        pages::search().into_response()
    } else {
        Redirect::to("/dashboard").into_response()
    }
}
