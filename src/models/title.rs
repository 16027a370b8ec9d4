use serde::{Deserialize, Serialize};

use crate::entities::{TitleKind, titles};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub id: i32,
    pub name: String,
    pub year: Option<i32>,
    pub genre: String,
    pub synopsis: String,
    pub banner: String,
    pub kind: TitleKind,
    pub season_count: i32,
    pub created_at: String,
}

impl From<titles::Model> for Title {
    fn from(model: titles::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            year: model.year,
            genre: model.genre,
            synopsis: model.synopsis,
            banner: model.banner,
            kind: model.kind,
            season_count: model.season_count,
            created_at: model.created_at,
        }
    }
}

/// A title ready to be inserted; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub year: Option<i32>,
    pub genre: String,
    pub synopsis: String,
    pub banner: String,
    pub kind: TitleKind,
}

impl NewTitle {
    #[must_use]
    pub fn movie(name: impl Into<String>) -> Self {
        Self::blank(name, TitleKind::Movie)
    }

    #[must_use]
    pub fn series(name: impl Into<String>) -> Self {
        Self::blank(name, TitleKind::Series)
    }

    fn blank(name: impl Into<String>, kind: TitleKind) -> Self {
        Self {
            name: name.into(),
            year: None,
            genre: String::new(),
            synopsis: String::new(),
            banner: String::new(),
            kind,
        }
    }
}
