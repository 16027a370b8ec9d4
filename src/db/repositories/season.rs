use crate::entities::{episodes, prelude::*, seasons, titles};
use crate::models::{Episode, Season, SeasonInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Counts written by [`SeasonRepository::replace_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeWriteSummary {
    pub seasons: usize,
    pub episodes: usize,
}

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Replaces the season tree of `title_id` and sets its season count, all in
    /// one transaction. Nothing is kept if any statement fails.
    pub async fn replace_tree(
        &self,
        title_id: i32,
        tree: &[SeasonInput],
        season_count: i32,
    ) -> Result<TreeWriteSummary, sea_orm::DbErr> {
        let txn = self.conn.begin().await?;

        let existing: Vec<i32> = Seasons::find()
            .select_only()
            .column(seasons::Column::Id)
            .filter(seasons::Column::TitleId.eq(title_id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !existing.is_empty() {
            debug!(title_id, seasons = existing.len(), "Dropping previous season tree");
            Episodes::delete_many()
                .filter(episodes::Column::SeasonId.is_in(existing))
                .exec(&txn)
                .await?;
            Seasons::delete_many()
                .filter(seasons::Column::TitleId.eq(title_id))
                .exec(&txn)
                .await?;
        }

        let mut episode_total = 0;
        for season in tree {
            let inserted = seasons::ActiveModel {
                title_id: Set(title_id),
                number: Set(season.number),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            if season.episodes.is_empty() {
                continue;
            }

            let rows = season.episodes.iter().map(|ep| episodes::ActiveModel {
                season_id: Set(inserted.id),
                number: Set(ep.number),
                name: Set(ep.name.clone()),
                synopsis: Set(ep.synopsis.clone()),
                still: Set(ep.still.clone()),
                ..Default::default()
            });

            Episodes::insert_many(rows).exec(&txn).await?;
            episode_total += season.episodes.len();
        }

        let updated = Titles::update_many()
            .col_expr(titles::Column::SeasonCount, Expr::value(season_count))
            .filter(titles::Column::Id.eq(title_id))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            return Err(sea_orm::DbErr::RecordNotUpdated);
        }

        txn.commit().await?;

        info!(
            title_id,
            seasons = tree.len(),
            episodes = episode_total,
            "Stored season tree"
        );

        Ok(TreeWriteSummary {
            seasons: tree.len(),
            episodes: episode_total,
        })
    }

    /// Seasons of a title ordered by number, each with episodes ordered by number.
    pub async fn list_tree(&self, title_id: i32) -> Result<Vec<Season>> {
        let season_rows = Seasons::find()
            .filter(seasons::Column::TitleId.eq(title_id))
            .order_by_asc(seasons::Column::Number)
            .all(&self.conn)
            .await?;

        if season_rows.is_empty() {
            return Ok(Vec::new());
        }

        let season_ids: Vec<i32> = season_rows.iter().map(|s| s.id).collect();
        let episode_rows = Episodes::find()
            .filter(episodes::Column::SeasonId.is_in(season_ids))
            .order_by_asc(episodes::Column::SeasonId)
            .order_by_asc(episodes::Column::Number)
            .all(&self.conn)
            .await?;

        let mut by_season: HashMap<i32, Vec<Episode>> = HashMap::new();
        for row in episode_rows {
            by_season.entry(row.season_id).or_default().push(Episode {
                id: row.id,
                number: row.number,
                name: row.name,
                synopsis: row.synopsis,
                still: row.still,
            });
        }

        Ok(season_rows
            .into_iter()
            .map(|s| Season {
                id: s.id,
                number: s.number,
                episodes: by_season.remove(&s.id).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn count_for_title(&self, title_id: i32) -> Result<u64> {
        Ok(Seasons::find()
            .filter(seasons::Column::TitleId.eq(title_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_episodes_for_title(&self, title_id: i32) -> Result<u64> {
        Ok(Episodes::find()
            .inner_join(Seasons)
            .filter(seasons::Column::TitleId.eq(title_id))
            .count(&self.conn)
            .await?)
    }
}
