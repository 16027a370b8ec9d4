use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::credentials::ApiKeyStore;
use crate::db::Store;
use crate::services::{AuthService, CatalogService, ImageRelay, IngestService};
use crate::state::SharedState;

pub mod auth;
mod catalog;
mod dashboard;
mod error;
mod images;
mod observability;
mod pages;
pub mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn keys(&self) -> &ApiKeyStore {
        &self.shared.keys
    }

    #[must_use]
    pub fn image_relay(&self) -> &ImageRelay {
        &self.shared.image_relay
    }

    #[must_use]
    pub fn auth_service(&self) -> &dyn AuthService {
        self.shared.auth_service.as_ref()
    }

    #[must_use]
    pub fn catalog_service(&self) -> &dyn CatalogService {
        self.shared.catalog_service.as_ref()
    }

    #[must_use]
    pub fn ingest_service(&self) -> &dyn IngestService {
        self.shared.ingest_service.as_ref()
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let cors_origins = &server.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let public_routes = Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/img/{*path}", get(images::relay_image))
        .route("/img_eps/{*path}", get(images::relay_image));

    Router::new()
        .merge(create_protected_router())
        .merge(public_routes)
        .layer(session_layer)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_metrics))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/dashboard",
            get(dashboard::dashboard_page).post(dashboard::save_api_key),
        )
        .route("/add_conteudo", get(dashboard::add_content_page))
        .route(
            "/pesquisar_conteudo",
            axum::routing::post(catalog::search_content),
        )
        .route("/salvar_conteudo", axum::routing::post(catalog::save_content))
        .route(
            "/add_temporadas",
            get(catalog::add_seasons_page).post(catalog::ingest_seasons),
        )
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/filmes", get(catalog::list_movies))
        .route("/api/series", get(catalog::list_series))
        .route("/api/serie/{id}", get(catalog::get_series))
        .route("/api/titulos/{id}", delete(catalog::remove_title))
        .route(
            "/api/usuarios",
            get(users::list_users).post(users::create_user),
        )
        .route("/api/usuarios/{username}", delete(users::delete_user))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
