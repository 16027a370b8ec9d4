pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, SaveTitleRequest};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod ingest_service;
pub mod ingest_service_impl;
pub use ingest_service::{IngestError, IngestService};
pub use ingest_service_impl::SeaOrmIngestService;

pub mod image;
pub use image::{ImageRelay, ImageType};

#[cfg(test)]
pub(crate) mod testing;
