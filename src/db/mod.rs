use crate::config::{Config, SecurityConfig};
use crate::entities::TitleKind;
use crate::models::{NewTitle, Season, SeasonInput, Title};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::season::TreeWriteSummary;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = db_url.strip_prefix("sqlite:")
            && !path_str.starts_with(":memory:")
        {
            let path_str = path_str.trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn ensure_bootstrap_user(&self, security: &SecurityConfig) -> Result<()> {
        let created = self
            .user_repo()
            .ensure_exists(
                &security.bootstrap_username,
                &security.bootstrap_password,
                security,
            )
            .await?;

        if created {
            info!(
                "Created bootstrap user '{}'; change its password",
                security.bootstrap_username
            );
        }
        Ok(())
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(username, password, security).await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password, security)
            .await
    }

    pub async fn delete_user(&self, username: &str) -> Result<bool> {
        self.user_repo().delete(username).await
    }

    // ========== Titles ==========

    pub async fn add_title(&self, title: &NewTitle) -> Result<Title> {
        self.title_repo().add(title).await
    }

    pub async fn get_series(&self, id: i32) -> Result<Option<Title>> {
        self.title_repo().get_of_kind(id, TitleKind::Series).await
    }

    pub async fn count_titles(&self, kind: TitleKind) -> Result<u64> {
        self.title_repo().count_by_kind(kind).await
    }

    pub async fn list_titles_page(
        &self,
        kind: TitleKind,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Title>> {
        self.title_repo().list_page(kind, limit, offset).await
    }

    pub async fn list_titles(&self, kind: TitleKind) -> Result<Vec<Title>> {
        self.title_repo().list_by_kind(kind).await
    }

    pub async fn remove_title(&self, id: i32) -> Result<bool> {
        self.title_repo().remove(id).await
    }

    // ========== Seasons & episodes ==========

    pub async fn replace_season_tree(
        &self,
        title_id: i32,
        tree: &[SeasonInput],
        season_count: i32,
    ) -> Result<TreeWriteSummary, sea_orm::DbErr> {
        self.season_repo()
            .replace_tree(title_id, tree, season_count)
            .await
    }

    pub async fn get_season_tree(&self, title_id: i32) -> Result<Vec<Season>> {
        self.season_repo().list_tree(title_id).await
    }

    pub async fn count_seasons(&self, title_id: i32) -> Result<u64> {
        self.season_repo().count_for_title(title_id).await
    }

    pub async fn count_episodes(&self, title_id: i32) -> Result<u64> {
        self.season_repo().count_episodes_for_title(title_id).await
    }
}
