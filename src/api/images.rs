use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::AppState;

const NOT_FOUND: &str = "Imagem não encontrada";

/// GET /img/{*path} and GET /img_eps/{*path}
/// Relays the provider image; every failure is a plain 404.
pub async fn relay_image(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    match state.image_relay().fetch(&path).await {
        Ok(Some(image)) => (
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, "no-store".to_string()),
            ],
            image.bytes,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, NOT_FOUND).into_response(),
        Err(e) => {
            tracing::warn!(path, error = %e, "Image relay failed");
            (StatusCode::NOT_FOUND, NOT_FOUND).into_response()
        }
    }
}
