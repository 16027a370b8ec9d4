use std::sync::Arc;

use crate::clients::{CatalogProvider, TmdbClient};
use crate::config::Config;
use crate::credentials::ApiKeyStore;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, ImageRelay, IngestService, SeaOrmAuthService,
    SeaOrmCatalogService, SeaOrmIngestService,
};

/// Build the HTTP client shared by every provider call.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("filmoteca/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub keys: Arc<ApiKeyStore>,

    pub provider: Arc<dyn CatalogProvider>,

    pub image_relay: Arc<ImageRelay>,

    pub auth_service: Arc<dyn AuthService>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub ingest_service: Arc<dyn IngestService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config).await?;
        store.ensure_bootstrap_user(&config.security).await?;

        let keys = Arc::new(ApiKeyStore::load(&config.tmdb.credentials_path).await?);

        let http_client = build_shared_http_client(config.tmdb.request_timeout_seconds)?;
        let provider = Arc::new(TmdbClient::with_shared_client(
            http_client,
            config.tmdb.clone(),
            keys.clone(),
        )) as Arc<dyn CatalogProvider>;

        Ok(Self::with_provider(config, store, keys, provider))
    }

    /// Wires the services around an already built store and provider.
    #[must_use]
    pub fn with_provider(
        config: Config,
        store: Store,
        keys: Arc<ApiKeyStore>,
        provider: Arc<dyn CatalogProvider>,
    ) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let catalog_service = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            provider.clone(),
            keys.clone(),
        )) as Arc<dyn CatalogService>;

        let ingest_service = Arc::new(SeaOrmIngestService::new(store.clone(), provider.clone()))
            as Arc<dyn IngestService>;

        let image_relay = Arc::new(ImageRelay::new(provider.clone()));

        Self {
            config: Arc::new(config),
            store,
            keys,
            provider,
            image_relay,
            auth_service,
            catalog_service,
            ingest_service,
        }
    }
}
