//! In-process stand-ins used by the service unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::tmdb::{SeasonDetails, TitleDetails};
use crate::clients::{CatalogProvider, ProviderError, ProviderImage};
use crate::db::Store;
use crate::entities::TitleKind;

/// Fresh SQLite file per call; `sqlite::memory:` would give each pooled
/// connection its own database.
pub async fn temp_store() -> Store {
    let path = std::env::temp_dir().join(format!("filmoteca-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", path.display()))
        .await
        .unwrap()
}

fn clone_error(err: &ProviderError) -> ProviderError {
    match err {
        ProviderError::MissingApiKey => ProviderError::MissingApiKey,
        ProviderError::Status(code) => ProviderError::Status(*code),
        ProviderError::Request(msg) => ProviderError::Request(msg.clone()),
        ProviderError::Decode(msg) => ProviderError::Decode(msg.clone()),
    }
}

#[derive(Default)]
pub struct FakeProvider {
    series_id: Option<i64>,
    details: TitleDetails,
    details_error: Option<ProviderError>,
    seasons: HashMap<i32, SeasonDetails>,
    failing_season: Option<i32>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    #[must_use]
    pub fn with_series_id(mut self, id: i64) -> Self {
        self.series_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: TitleDetails) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn failing_details(mut self, err: ProviderError) -> Self {
        self.details_error = Some(err);
        self
    }

    #[must_use]
    pub fn with_season(mut self, number: i32, season: SeasonDetails) -> Self {
        self.seasons.insert(number, season);
        self
    }

    #[must_use]
    pub fn failing_season(mut self, number: i32) -> Self {
        self.failing_season = Some(number);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogProvider for FakeProvider {
    async fn search_raw(
        &self,
        kind: TitleKind,
        query: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        self.record(format!("search:{}:{query}", kind.as_str()));
        Ok(serde_json::json!({ "page": 1, "results": [] }))
    }

    async fn find_series_id(&self, name: &str) -> Result<Option<i64>, ProviderError> {
        self.record(format!("find:{name}"));
        Ok(self.series_id)
    }

    async fn details(&self, _kind: TitleKind, tmdb_id: i64) -> Result<TitleDetails, ProviderError> {
        self.record(format!("details:{tmdb_id}"));
        match &self.details_error {
            Some(err) => Err(clone_error(err)),
            None => Ok(self.details.clone()),
        }
    }

    async fn season(&self, tv_id: i64, season_number: i32) -> Result<SeasonDetails, ProviderError> {
        self.record(format!("season:{tv_id}:{season_number}"));
        if self.failing_season == Some(season_number) {
            return Err(ProviderError::Status(500));
        }
        Ok(self.seasons.get(&season_number).cloned().unwrap_or_default())
    }

    async fn image(&self, _path: &str) -> Result<Option<ProviderImage>, ProviderError> {
        Ok(None)
    }
}
