use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Movie row of `GET /api/filmes`. `capa` and `banner` carry the same relay path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "capa")]
    pub cover: String,
    pub banner: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
}

/// Series row of `GET /api/series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDto {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub banner: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "temporadas")]
    pub season_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(rename = "pagina_atual")]
    pub current_page: u64,
    #[serde(rename = "total_paginas")]
    pub total_pages: u64,
    #[serde(rename = "total_filmes")]
    pub total: u64,
    #[serde(rename = "filmes")]
    pub items: Vec<MovieDto>,
    #[serde(rename = "proxima_pagina")]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPage {
    #[serde(rename = "pagina_atual")]
    pub current_page: u64,
    #[serde(rename = "total_paginas")]
    pub total_pages: u64,
    #[serde(rename = "total_series")]
    pub total: u64,
    #[serde(rename = "series")]
    pub items: Vec<SeriesDto>,
    #[serde(rename = "proxima_pagina")]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeDto {
    #[serde(rename = "numero")]
    pub number: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    /// Relay path of the still, empty if the provider had none
    #[serde(rename = "capa")]
    pub still: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDto {
    #[serde(rename = "numero")]
    pub number: i32,
    #[serde(rename = "episodios")]
    pub episodes: Vec<EpisodeDto>,
}

/// Body of `GET /api/serie/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDetailDto {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub banner: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "temporadas")]
    pub seasons: Vec<SeasonDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesOptionDto {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    #[serde(rename = "total_filmes")]
    pub movie_count: u64,
    #[serde(rename = "total_series")]
    pub series_count: u64,
    #[serde(rename = "tmdb_key_configurada")]
    pub api_key_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(rename = "usuario")]
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Outcome of a season ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReportDto {
    #[serde(rename = "serie_id")]
    pub title_id: i32,
    #[serde(rename = "temporadas")]
    pub seasons: usize,
    #[serde(rename = "episodios")]
    pub episodes: usize,
}
