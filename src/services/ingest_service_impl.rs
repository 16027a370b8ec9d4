//! `SeaORM` implementation of the `IngestService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::IngestReportDto;
use crate::clients::CatalogProvider;
use crate::clients::tmdb::EpisodeDetails;
use crate::db::Store;
use crate::domain::TitleId;
use crate::entities::TitleKind;
use crate::models::{EpisodeInput, SeasonInput};
use crate::services::ingest_service::{IngestError, IngestService};

pub struct SeaOrmIngestService {
    store: Store,
    provider: Arc<dyn CatalogProvider>,
}

impl SeaOrmIngestService {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn CatalogProvider>) -> Self {
        Self { store, provider }
    }

    /// Missing optional fields become empty strings; a missing number becomes 0.
    fn episode_input(ep: EpisodeDetails) -> EpisodeInput {
        EpisodeInput {
            number: ep.episode_number.unwrap_or(0),
            name: ep.name.unwrap_or_default(),
            synopsis: ep.overview.unwrap_or_default(),
            still: ep
                .still_path
                .map(|p| p.trim_start_matches('/').to_string())
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl IngestService for SeaOrmIngestService {
    async fn ingest_series(&self, id: TitleId) -> Result<IngestReportDto, IngestError> {
        let series = self
            .store
            .get_series(id.value())
            .await?
            .ok_or(IngestError::SeriesNotFound(id))?;

        let tv_id = self
            .provider
            .find_series_id(&series.name)
            .await?
            .ok_or_else(|| IngestError::NoProviderMatch(series.name.clone()))?;

        let details = self.provider.details(TitleKind::Series, tv_id).await?;
        let season_count = details.number_of_seasons.unwrap_or(0).max(0);

        info!(
            title_id = series.id,
            tv_id, season_count, "Fetching season tree: {}", series.name
        );

        let mut tree = Vec::with_capacity(usize::try_from(season_count).unwrap_or_default());
        for number in 1..=season_count {
            let season = self.provider.season(tv_id, number).await?;
            tree.push(SeasonInput {
                number,
                episodes: season.episodes.into_iter().map(Self::episode_input).collect(),
            });
        }

        let summary = self
            .store
            .replace_season_tree(series.id, &tree, season_count)
            .await
            .map_err(|e| {
                warn!(title_id = series.id, error = %e, "Season tree write rolled back");
                IngestError::Storage(e.to_string())
            })?;

        Ok(IngestReportDto {
            title_id: series.id,
            seasons: summary.seasons,
            episodes: summary.episodes,
        })
    }
}
