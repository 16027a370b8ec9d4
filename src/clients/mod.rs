pub mod provider;
pub mod tmdb;

pub use provider::{CatalogProvider, ProviderError, ProviderImage};
pub use tmdb::TmdbClient;
