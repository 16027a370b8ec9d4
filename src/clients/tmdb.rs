//! TMDb client.
//! API Documentation: <https://developer.themoviedb.org/reference/intro/getting-started>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::provider::{CatalogProvider, ProviderError, ProviderImage};
use crate::config::TmdbConfig;
use crate::credentials::ApiKeyStore;
use crate::entities::TitleKind;

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Fields shared by the movie and TV detail payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TitleDetails {
    pub genres: Vec<Genre>,
    pub overview: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    /// Only present on TV details
    pub number_of_seasons: Option<i32>,
}

impl TitleDetails {
    #[must_use]
    pub fn genre_list(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Backdrop preferred, poster as fallback, without the leading slash.
    #[must_use]
    pub fn banner_path(&self) -> String {
        self.backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.poster_path.as_deref().filter(|p| !p.is_empty()))
            .map(|p| p.trim_start_matches('/').to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeasonDetails {
    pub episodes: Vec<EpisodeDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpisodeDetails {
    pub episode_number: Option<i32>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub still_path: Option<String>,
}

pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
    keys: Arc<ApiKeyStore>,
}

impl TmdbClient {
    #[must_use]
    pub const fn with_shared_client(
        client: Client,
        config: TmdbConfig,
        keys: Arc<ApiKeyStore>,
    ) -> Self {
        Self {
            client,
            config,
            keys,
        }
    }

    const fn kind_segment(kind: TitleKind) -> &'static str {
        match kind {
            TitleKind::Movie => "movie",
            TitleKind::Series => "tv",
        }
    }

    /// Builds `<api_base>/<path>` with the key and language parameters.
    fn endpoint(&self, path: &str, api_key: &str) -> Result<Url, ProviderError> {
        let base = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&base).map_err(|e| ProviderError::Request(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("api_key", api_key)
            .append_pair("language", &self.config.language);
        Ok(url)
    }

    fn image_url(&self, path: &str) -> Result<Url, ProviderError> {
        let raw = format!(
            "{}/{}/{}",
            self.config.image_base_url.trim_end_matches('/'),
            self.config.image_size,
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ProviderError::Request(e.to_string()))
    }

    async fn api_key(&self) -> Result<String, ProviderError> {
        self.keys.get().await.ok_or(ProviderError::MissingApiKey)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        debug!(path = url.path(), "TMDb request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    async fn search_raw(
        &self,
        kind: TitleKind,
        query: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let api_key = self.api_key().await?;
        let mut url = self.endpoint(&format!("search/{}", Self::kind_segment(kind)), &api_key)?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", "1")
            .append_pair("include_adult", "false");

        self.get_json(url).await
    }

    async fn find_series_id(&self, name: &str) -> Result<Option<i64>, ProviderError> {
        let api_key = self.api_key().await?;
        let mut url = self.endpoint("search/tv", &api_key)?;
        url.query_pairs_mut().append_pair("query", name);

        let results: SearchResults = self.get_json(url).await?;
        Ok(results.results.first().map(|hit| hit.id))
    }

    async fn details(&self, kind: TitleKind, tmdb_id: i64) -> Result<TitleDetails, ProviderError> {
        let api_key = self.api_key().await?;
        let url = self.endpoint(
            &format!("{}/{tmdb_id}", Self::kind_segment(kind)),
            &api_key,
        )?;

        self.get_json(url).await
    }

    async fn season(&self, tv_id: i64, season_number: i32) -> Result<SeasonDetails, ProviderError> {
        let api_key = self.api_key().await?;
        let url = self.endpoint(&format!("tv/{tv_id}/season/{season_number}"), &api_key)?;

        self.get_json(url).await
    }

    async fn image(&self, path: &str) -> Result<Option<ProviderImage>, ProviderError> {
        let url = self.image_url(path)?;
        debug!(path = url.path(), "TMDb image request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(path)
                    .first()
                    .filter(|m| m.type_() == mime_guess::mime::IMAGE)
                    .map_or_else(|| "image/jpeg".to_string(), |m| m.to_string())
            });

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        Ok(Some(ProviderImage {
            bytes: bytes.to_vec(),
            content_type,
        }))
    }
}
