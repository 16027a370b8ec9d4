use std::sync::Arc;
use tracing::debug;

use crate::clients::{CatalogProvider, ProviderError, ProviderImage};

/// Which relay route a stored image reference is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Banner,
    Still,
}

impl ImageType {
    #[must_use]
    pub const fn route_prefix(&self) -> &'static str {
        match self {
            Self::Banner => "/img",
            Self::Still => "/img_eps",
        }
    }

    /// Local relay path for a stored provider path; empty when there is none.
    #[must_use]
    pub fn local_path(&self, provider_path: &str) -> String {
        let trimmed = provider_path.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return String::new();
        }
        format!("{}/{}", self.route_prefix(), trimmed)
    }
}

/// Streams provider images through the local `/img` and `/img_eps` routes.
pub struct ImageRelay {
    provider: Arc<dyn CatalogProvider>,
}

impl ImageRelay {
    #[must_use]
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Fetches an image by provider path. `Ok(None)` for rejected paths and
    /// anything the provider does not answer with 200.
    pub async fn fetch(&self, path: &str) -> Result<Option<ProviderImage>, ProviderError> {
        let Some(path) = sanitize_path(path) else {
            debug!(path, "Rejected image path");
            return Ok(None);
        };

        self.provider.image(&path).await
    }
}

/// Normalizes a requested image path. Empty paths, traversal segments and
/// query or fragment characters are refused.
#[must_use]
pub fn sanitize_path(path: &str) -> Option<String> {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed.is_empty() || trimmed.contains(['?', '#', '\\']) {
        return None;
    }

    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return None;
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_paths_use_route_prefix() {
        assert_eq!(ImageType::Banner.local_path("/abc.jpg"), "/img/abc.jpg");
        assert_eq!(ImageType::Banner.local_path("abc.jpg"), "/img/abc.jpg");
        assert_eq!(ImageType::Still.local_path("/ep.jpg"), "/img_eps/ep.jpg");
        assert_eq!(ImageType::Still.local_path(""), "");
    }

    #[test]
    fn sanitize_rejects_traversal_and_empty() {
        assert_eq!(sanitize_path("/abc.jpg").as_deref(), Some("abc.jpg"));
        assert_eq!(sanitize_path("w500/abc.jpg").as_deref(), Some("w500/abc.jpg"));
        assert!(sanitize_path("").is_none());
        assert!(sanitize_path("../etc/passwd").is_none());
        assert!(sanitize_path("a//b.jpg").is_none());
        assert!(sanitize_path("abc.jpg?x=1").is_none());
    }
}
