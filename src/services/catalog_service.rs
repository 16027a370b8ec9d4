//! Domain service for the title catalog.
//!
//! Covers the provider search passthrough, saving titles after a details
//! lookup, the paginated listings, series detail assembly and removal.

use crate::api::types::{
    DashboardDto, MoviePage, SeriesDetailDto, SeriesOptionDto, SeriesPage,
};
use crate::clients::ProviderError;
use crate::domain::{PageNumber, TitleId};
use crate::entities::TitleKind;
use crate::models::Title;
use thiserror::Error;

/// Rows per listing page.
pub const PAGE_SIZE: u64 = 50;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Title {0} not found")]
    NotFound(TitleId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi { service: String, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<ProviderError> for CatalogError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey => Self::Validation(err.to_string()),
            other => Self::ExternalApi {
                service: "TMDb".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Form values of the save action.
#[derive(Debug, Clone)]
pub struct SaveTitleRequest {
    pub name: String,
    pub year: Option<i32>,
    pub kind: TitleKind,
    pub tmdb_id: i64,
}

/// Position of one page within a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current: u64,
    pub total_pages: u64,
    pub next: Option<u64>,
}

impl PageInfo {
    /// Next-page link under `base`, e.g. `/api/filmes?page=3`.
    #[must_use]
    pub fn next_link(&self, base: &str) -> Option<String> {
        self.next.map(|n| format!("{base}?page={n}"))
    }
}

/// Page arithmetic for a listing of `total` rows.
#[must_use]
pub const fn paginate(total: u64, page: PageNumber, page_size: u64) -> PageInfo {
    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };
    let current = page.value();
    let next = if current < total_pages {
        Some(current + 1)
    } else {
        None
    };

    PageInfo {
        current,
        total_pages,
        next,
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Runs a provider search and returns its JSON untouched.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] for an empty query or a missing API key
    /// - [`CatalogError::ExternalApi`] when the provider call fails
    async fn search_remote(
        &self,
        kind: TitleKind,
        query: &str,
    ) -> Result<serde_json::Value, CatalogError>;

    /// Looks the title up on the provider and stores it with a season count of 0.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] for an empty name or a missing API key
    /// - [`CatalogError::ExternalApi`] when the details lookup fails
    async fn save_title(&self, request: SaveTitleRequest) -> Result<Title, CatalogError>;

    async fn list_movies(&self, page: PageNumber) -> Result<MoviePage, CatalogError>;

    async fn list_series(&self, page: PageNumber) -> Result<SeriesPage, CatalogError>;

    /// Assembles a series with its seasons and episodes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no series has this id.
    async fn series_detail(&self, id: TitleId) -> Result<SeriesDetailDto, CatalogError>;

    /// Every stored series by name, for the ingestion picker.
    async fn series_options(&self) -> Result<Vec<SeriesOptionDto>, CatalogError>;

    /// Removes a title and its season tree.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the title does not exist.
    async fn remove_title(&self, id: TitleId) -> Result<(), CatalogError>;

    async fn dashboard(&self) -> Result<DashboardDto, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_twenty_rows_span_three_pages() {
        let second = paginate(120, PageNumber::new(2), PAGE_SIZE);
        assert_eq!(second.total_pages, 3);
        assert_eq!(second.next, Some(3));
        assert_eq!(
            second.next_link("/api/filmes").as_deref(),
            Some("/api/filmes?page=3")
        );

        let third = paginate(120, PageNumber::new(3), PAGE_SIZE);
        assert_eq!(third.next, None);
        assert_eq!(third.next_link("/api/filmes"), None);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let info = paginate(0, PageNumber::FIRST, PAGE_SIZE);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.current, 1);
        assert_eq!(info.next, None);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(paginate(100, PageNumber::FIRST, PAGE_SIZE).total_pages, 2);
        assert_eq!(paginate(101, PageNumber::FIRST, PAGE_SIZE).total_pages, 3);
    }

    #[test]
    fn missing_key_is_a_validation_error() {
        assert!(matches!(
            CatalogError::from(ProviderError::MissingApiKey),
            CatalogError::Validation(_)
        ));
        assert!(matches!(
            CatalogError::from(ProviderError::Status(503)),
            CatalogError::ExternalApi { .. }
        ));
    }
}
