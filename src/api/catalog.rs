//! Catalog endpoints: provider search, saving titles, season ingestion and
//! the JSON listings.
//!
//! Handlers only map HTTP to [`CatalogService`](crate::services::CatalogService)
//! and [`IngestService`](crate::services::IngestService) calls.

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{IngestReportDto, MoviePage, SeriesDetailDto, SeriesPage};
use super::validation::{
    parse_kind, parse_path_title_id, parse_title_id, parse_tmdb_id, parse_year,
    validate_search_query,
};
use super::{ApiError, ApiResponse, AppState, pages};
use crate::domain::PageNumber;
use crate::services::{CatalogError, IngestError, SaveTitleRequest};

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::not_found("Title", id),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::ExternalApi { service, message } => {
                Self::ExternalApiError { service, message }
            }
            CatalogError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::SeriesNotFound(id) => Self::not_found("Series", id),
            IngestError::NoProviderMatch(_) => Self::NotFound(err.to_string()),
            IngestError::Validation(msg) => Self::validation(msg),
            IngestError::Provider(msg) => Self::tmdb_error(msg),
            IngestError::Storage(msg) => Self::StorageError(msg),
            IngestError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
    pub tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub titulo: Option<String>,
    pub ano: Option<String>,
    pub tipo: Option<String>,
    pub tmdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IngestForm {
    pub serie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

const fn default_page() -> i64 {
    1
}

/// POST /pesquisar_conteudo
/// Returns the provider's search JSON unchanged.
pub async fn search_content(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = validate_search_query(form.query.as_deref())?;
    let kind = parse_kind(form.tipo.as_deref())?;

    let results = state.catalog_service().search_remote(kind, query).await?;
    Ok(Json(results))
}

/// POST /salvar_conteudo
pub async fn save_content(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveForm>,
) -> Result<Redirect, ApiError> {
    let kind = parse_kind(form.tipo.as_deref())?;
    let tmdb_id = parse_tmdb_id(form.tmdb_id.as_deref())?;
    let year = parse_year(form.ano.as_deref())?;

    state
        .catalog_service()
        .save_title(SaveTitleRequest {
            name: form.titulo.unwrap_or_default(),
            year,
            kind,
            tmdb_id,
        })
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// GET /add_temporadas
pub async fn add_seasons_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let series = state.catalog_service().series_options().await?;
    Ok(pages::add_seasons(&series).into_response())
}

/// POST /add_temporadas
/// Imports every season of `serie_id`, then returns to the dashboard.
pub async fn ingest_seasons(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IngestForm>,
) -> Result<Redirect, ApiError> {
    let id = parse_title_id(form.serie_id.as_deref())?;
    let report: IngestReportDto = state.ingest_service().ingest_series(id).await?;

    tracing::info!(
        title_id = report.title_id,
        seasons = report.seasons,
        episodes = report.episodes,
        "Season ingestion finished"
    );
    Ok(Redirect::to("/dashboard"))
}

/// GET /api/filmes
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = state
        .catalog_service()
        .list_movies(PageNumber::new(query.page))
        .await?;
    Ok(Json(page))
}

/// GET /api/series
pub async fn list_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SeriesPage>, ApiError> {
    let page = state
        .catalog_service()
        .list_series(PageNumber::new(query.page))
        .await?;
    Ok(Json(page))
}

/// GET /api/serie/{id}
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SeriesDetailDto>, ApiError> {
    let id = parse_path_title_id("Series", &id)?;
    let detail = state.catalog_service().series_detail(id).await?;
    Ok(Json(detail))
}

/// DELETE /api/titulos/{id}
pub async fn remove_title(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_path_title_id("Title", &id)?;
    state.catalog_service().remove_title(id).await?;
    Ok(Json(ApiResponse::success(())))
}
