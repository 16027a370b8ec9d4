//! User management command handlers

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

async fn auth_service(config: &Config) -> anyhow::Result<SeaOrmAuthService> {
    let store = Store::from_config(config).await?;
    Ok(SeaOrmAuthService::new(store, config.security.clone()))
}

pub async fn cmd_user_add(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let user = auth_service(config)
        .await?
        .create_user(username, password)
        .await?;
    println!("✓ Created user {}", user.username);
    Ok(())
}

/// Runs as the operator rather than a session user, so any account can go.
pub async fn cmd_user_remove(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;
    if store.delete_user(username).await? {
        println!("✓ Removed user {username}");
    } else {
        println!("No user named {username}");
    }
    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let users = auth_service(config).await?.list_users().await?;

    println!("Users ({} total)", users.len());
    println!("{:-<60}", "");
    for user in users {
        println!("  {} (created {})", user.username, user.created_at);
    }
    Ok(())
}

pub async fn cmd_user_passwd(
    config: &Config,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    auth_service(config)
        .await?
        .reset_password(username, password)
        .await?;
    println!("✓ Password updated for {username}");
    Ok(())
}
