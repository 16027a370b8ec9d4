//! File-backed storage for the TMDb API key.
//!
//! The key is written from the dashboard and read on every provider call, so it
//! is cached in memory and only persisted on change.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    tmdb_api_key: Option<String>,
}

#[derive(Debug)]
pub struct ApiKeyStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl ApiKeyStore {
    /// Reads the key file if present. A missing file means "not configured".
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let key = Self::read_file(&path).await?;

        Ok(Self {
            path,
            cached: RwLock::new(key),
        })
    }

    async fn read_file(path: &Path) -> Result<Option<String>> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;

        let file: CredentialsFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {}", path.display()))?;

        Ok(file.tmdb_api_key.filter(|k| !k.trim().is_empty()))
    }

    /// Current key, `None` when unset or blank.
    pub async fn get(&self) -> Option<String> {
        self.cached.read().await.clone()
    }

    pub async fn is_configured(&self) -> bool {
        self.cached.read().await.is_some()
    }

    /// Persists `key` and updates the cache. A blank key clears the setting.
    pub async fn set(&self, key: &str) -> Result<()> {
        let key = key.trim();
        let value = (!key.is_empty()).then(|| key.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string(&CredentialsFile {
            tmdb_api_key: value.clone(),
        })?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write credentials file: {}", self.path.display()))?;

        *self.cached.write().await = value;
        info!("TMDb API key updated at {}", self.path.display());
        Ok(())
    }
}
