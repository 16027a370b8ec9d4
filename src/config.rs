use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub tmdb: TmdbConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `sqlite:<path>` or `postgres://...`
    pub database_url: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/filmoteca.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Set the Secure flag on the session cookie. Requires HTTPS.
    pub secure_cookies: bool,

    pub session_inactivity_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: false,
            session_inactivity_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_base_url: String,

    pub image_base_url: String,

    /// Size segment used by the image relay (`w500`, `original`, ...)
    pub image_size: String,

    pub language: String,

    /// JSON file holding `{"tmdb_api_key": "..."}`, written from the dashboard.
    pub credentials_path: String,

    pub request_timeout_seconds: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            image_size: "w500".to_string(),
            language: "pt-BR".to_string(),
            credentials_path: "config.json".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB
    pub argon2_memory_cost_kib: u32,

    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,

    /// Account created on first start when no user with this name exists.
    pub bootstrap_username: String,

    pub bootstrap_password: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            bootstrap_username: "admin".to_string(),
            bootstrap_password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// `PORT` and `DATABASE_URL` take precedence over the file.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.general.database_url = url;
        }

        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("filmoteca").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".filmoteca").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.general.database_url;
        if !(url.starts_with("sqlite:") || url.starts_with("postgres")) {
            anyhow::bail!("Unsupported database URL: {url}");
        }

        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!("max_db_connections must be >= min_db_connections");
        }

        if self.security.bootstrap_password.is_empty() {
            anyhow::bail!("Bootstrap password cannot be empty");
        }

        url::Url::parse(&self.tmdb.api_base_url).context("Invalid TMDb API base URL")?;
        url::Url::parse(&self.tmdb.image_base_url).context("Invalid TMDb image base URL")?;

        Ok(())
    }
}
