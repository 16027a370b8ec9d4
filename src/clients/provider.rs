//! Seam between the catalog services and the external metadata provider.

use async_trait::async_trait;
use thiserror::Error;

use super::tmdb::{SeasonDetails, TitleDetails};
use crate::entities::TitleKind;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("TMDb API key is not configured")]
    MissingApiKey,

    #[error("TMDb responded with status {0}")]
    Status(u16),

    #[error("TMDb request failed: {0}")]
    Request(String),

    #[error("Invalid TMDb response: {0}")]
    Decode(String),
}

/// Raw image bytes relayed from the provider.
#[derive(Debug, Clone)]
pub struct ProviderImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Title search, returned exactly as the provider sent it.
    async fn search_raw(
        &self,
        kind: TitleKind,
        query: &str,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Provider id of the first TV search hit for `name`.
    async fn find_series_id(&self, name: &str) -> Result<Option<i64>, ProviderError>;

    async fn details(&self, kind: TitleKind, tmdb_id: i64) -> Result<TitleDetails, ProviderError>;

    async fn season(&self, tv_id: i64, season_number: i32) -> Result<SeasonDetails, ProviderError>;

    /// `Ok(None)` for any non-200 upstream answer.
    async fn image(&self, path: &str) -> Result<Option<ProviderImage>, ProviderError>;
}
