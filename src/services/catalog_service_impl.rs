//! `SeaORM` implementation of the `CatalogService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{
    DashboardDto, EpisodeDto, MovieDto, MoviePage, SeasonDto, SeriesDetailDto, SeriesDto,
    SeriesOptionDto, SeriesPage,
};
use crate::clients::CatalogProvider;
use crate::credentials::ApiKeyStore;
use crate::db::Store;
use crate::domain::{PageNumber, TitleId};
use crate::entities::TitleKind;
use crate::models::{NewTitle, Title};
use crate::services::catalog_service::{
    CatalogError, CatalogService, PAGE_SIZE, SaveTitleRequest, paginate,
};
use crate::services::image::ImageType;

pub struct SeaOrmCatalogService {
    store: Store,
    provider: Arc<dyn CatalogProvider>,
    keys: Arc<ApiKeyStore>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn CatalogProvider>, keys: Arc<ApiKeyStore>) -> Self {
        Self {
            store,
            provider,
            keys,
        }
    }

    /// Rows of one listing page; pages past the end read nothing.
    async fn page_rows(
        &self,
        kind: TitleKind,
        page: PageNumber,
        total_pages: u64,
    ) -> Result<Vec<Title>, CatalogError> {
        if page.value() > total_pages {
            return Ok(Vec::new());
        }

        Ok(self
            .store
            .list_titles_page(kind, PAGE_SIZE, page.offset(PAGE_SIZE))
            .await?)
    }

    fn movie_dto(title: Title) -> MovieDto {
        let banner = ImageType::Banner.local_path(&title.banner);
        MovieDto {
            id: title.id,
            name: title.name,
            cover: banner.clone(),
            banner,
            genre: title.genre,
            year: title.year,
            synopsis: title.synopsis,
        }
    }

    fn series_dto(title: Title) -> SeriesDto {
        SeriesDto {
            id: title.id,
            banner: ImageType::Banner.local_path(&title.banner),
            name: title.name,
            genre: title.genre,
            synopsis: title.synopsis,
            year: title.year,
            season_count: title.season_count,
        }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn search_remote(
        &self,
        kind: TitleKind,
        query: &str,
    ) -> Result<serde_json::Value, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        Ok(self.provider.search_raw(kind, query).await?)
    }

    async fn save_title(&self, request: SaveTitleRequest) -> Result<Title, CatalogError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("Title name is required".to_string()));
        }

        let details = self.provider.details(request.kind, request.tmdb_id).await?;

        let new_title = NewTitle {
            name: name.to_string(),
            year: request.year,
            genre: details.genre_list(),
            synopsis: details.overview.clone().unwrap_or_default(),
            banner: details.banner_path(),
            kind: request.kind,
        };

        let title = self.store.add_title(&new_title).await?;
        info!(
            id = title.id,
            tmdb_id = request.tmdb_id,
            kind = title.kind.as_str(),
            "Saved title from TMDb"
        );
        Ok(title)
    }

    async fn list_movies(&self, page: PageNumber) -> Result<MoviePage, CatalogError> {
        let total = self.store.count_titles(TitleKind::Movie).await?;
        let info = paginate(total, page, PAGE_SIZE);
        let rows = self.page_rows(TitleKind::Movie, page, info.total_pages).await?;

        Ok(MoviePage {
            current_page: info.current,
            total_pages: info.total_pages,
            total,
            items: rows.into_iter().map(Self::movie_dto).collect(),
            next_page: info.next_link("/api/filmes"),
        })
    }

    async fn list_series(&self, page: PageNumber) -> Result<SeriesPage, CatalogError> {
        let total = self.store.count_titles(TitleKind::Series).await?;
        let info = paginate(total, page, PAGE_SIZE);
        let rows = self.page_rows(TitleKind::Series, page, info.total_pages).await?;

        Ok(SeriesPage {
            current_page: info.current,
            total_pages: info.total_pages,
            total,
            items: rows.into_iter().map(Self::series_dto).collect(),
            next_page: info.next_link("/api/series"),
        })
    }

    async fn series_detail(&self, id: TitleId) -> Result<SeriesDetailDto, CatalogError> {
        let series = self
            .store
            .get_series(id.value())
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let seasons = self
            .store
            .get_season_tree(series.id)
            .await?
            .into_iter()
            .map(|season| SeasonDto {
                number: season.number,
                episodes: season
                    .episodes
                    .into_iter()
                    .map(|ep| EpisodeDto {
                        number: ep.number,
                        still: ImageType::Still.local_path(&ep.still),
                        name: ep.name,
                        synopsis: ep.synopsis,
                    })
                    .collect(),
            })
            .collect();

        Ok(SeriesDetailDto {
            id: series.id,
            banner: ImageType::Banner.local_path(&series.banner),
            name: series.name,
            genre: series.genre,
            synopsis: series.synopsis,
            year: series.year,
            seasons,
        })
    }

    async fn series_options(&self) -> Result<Vec<SeriesOptionDto>, CatalogError> {
        let series = self.store.list_titles(TitleKind::Series).await?;
        Ok(series
            .into_iter()
            .map(|t| SeriesOptionDto {
                id: t.id,
                name: t.name,
            })
            .collect())
    }

    async fn remove_title(&self, id: TitleId) -> Result<(), CatalogError> {
        if self.store.remove_title(id.value()).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(id))
        }
    }

    async fn dashboard(&self) -> Result<DashboardDto, CatalogError> {
        Ok(DashboardDto {
            movie_count: self.store.count_titles(TitleKind::Movie).await?,
            series_count: self.store.count_titles(TitleKind::Series).await?,
            api_key_configured: self.keys.is_configured().await,
        })
    }
}
