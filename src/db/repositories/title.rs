use crate::entities::{TitleKind, episodes, prelude::*, seasons, titles};
use crate::models::{NewTitle, Title};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, title: &NewTitle) -> Result<Title> {
        let active = titles::ActiveModel {
            name: Set(title.name.clone()),
            year: Set(title.year),
            genre: Set(title.genre.clone()),
            synopsis: Set(title.synopsis.clone()),
            banner: Set(title.banner.clone()),
            kind: Set(title.kind),
            season_count: Set(0),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to insert title {}", title.name))?;

        info!(id = model.id, kind = model.kind.as_str(), "Added title: {}", model.name);
        Ok(Title::from(model))
    }

    pub async fn get_of_kind(&self, id: i32, kind: TitleKind) -> Result<Option<Title>> {
        let model = Titles::find_by_id(id)
            .filter(titles::Column::Kind.eq(kind))
            .one(&self.conn)
            .await?;
        Ok(model.map(Title::from))
    }

    pub async fn count_by_kind(&self, kind: TitleKind) -> Result<u64> {
        let count = Titles::find()
            .filter(titles::Column::Kind.eq(kind))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    /// Newest first. Limit and offset are capped to the signed range the
    /// database driver binds.
    pub async fn list_page(&self, kind: TitleKind, limit: u64, offset: u64) -> Result<Vec<Title>> {
        let max = i64::MAX.unsigned_abs();
        let rows = Titles::find()
            .filter(titles::Column::Kind.eq(kind))
            .order_by_desc(titles::Column::Id)
            .limit(limit.min(max))
            .offset(offset.min(max))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Title::from).collect())
    }

    pub async fn list_by_kind(&self, kind: TitleKind) -> Result<Vec<Title>> {
        let rows = Titles::find()
            .filter(titles::Column::Kind.eq(kind))
            .order_by_asc(titles::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Title::from).collect())
    }

    /// Removes a title together with its seasons and episodes.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let season_ids: Vec<i32> = Seasons::find()
            .select_only()
            .column(seasons::Column::Id)
            .filter(seasons::Column::TitleId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !season_ids.is_empty() {
            Episodes::delete_many()
                .filter(episodes::Column::SeasonId.is_in(season_ids))
                .exec(&txn)
                .await?;
            Seasons::delete_many()
                .filter(seasons::Column::TitleId.eq(id))
                .exec(&txn)
                .await?;
        }

        let result = Titles::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed title with ID: {}", id);
        }
        Ok(removed)
    }
}
