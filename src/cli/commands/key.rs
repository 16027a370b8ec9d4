use crate::config::Config;
use crate::credentials::ApiKeyStore;

pub async fn cmd_set_tmdb_key(config: &Config, key: &str) -> anyhow::Result<()> {
    let keys = ApiKeyStore::load(&config.tmdb.credentials_path).await?;
    keys.set(key).await?;

    if keys.is_configured().await {
        println!("✓ TMDb API key saved to {}", config.tmdb.credentials_path);
    } else {
        println!("TMDb API key cleared");
    }
    Ok(())
}
