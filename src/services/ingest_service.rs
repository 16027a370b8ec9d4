//! Domain service for importing a series' seasons and episodes.

use crate::api::types::IngestReportDto;
use crate::clients::ProviderError;
use crate::domain::TitleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Series {0} not found")]
    SeriesNotFound(TitleId),

    #[error("No TMDb match for '{0}'")]
    NoProviderMatch(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("TMDb error: {0}")]
    Provider(String),

    /// Write of the season tree failed and was rolled back.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<ProviderError> for IngestError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey => Self::Validation(err.to_string()),
            other => Self::Provider(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for IngestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait IngestService: Send + Sync {
    /// Resolves the series on the provider, fetches every season and replaces
    /// the stored tree in one transaction.
    ///
    /// Nothing is written unless every provider call succeeded; a failed write
    /// leaves the previous tree and season count in place.
    ///
    /// # Errors
    ///
    /// - [`IngestError::SeriesNotFound`] if `id` is not a stored series
    /// - [`IngestError::NoProviderMatch`] if the provider search is empty
    /// - [`IngestError::Provider`] when a provider call fails
    /// - [`IngestError::Storage`] when the transaction fails
    async fn ingest_series(&self, id: TitleId) -> Result<IngestReportDto, IngestError>;
}
