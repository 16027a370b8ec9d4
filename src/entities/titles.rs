use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wire values follow the catalog's form fields (`filme` / `serie`); the
/// English spellings are accepted too.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum TitleKind {
    #[sea_orm(string_value = "movie")]
    #[serde(rename = "filme", alias = "movie")]
    Movie,
    #[sea_orm(string_value = "series")]
    #[serde(rename = "serie", alias = "series")]
    Series,
}

impl TitleKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Parses a form value; `None` for anything unrecognized.
    #[must_use]
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim() {
            "filme" | "movie" => Some(Self::Movie),
            "serie" | "series" | "tv" => Some(Self::Series),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub year: Option<i32>,
    /// Comma-joined genre names
    pub genre: String,
    pub synopsis: String,
    /// Provider image path, stored without the leading slash
    pub banner: String,
    pub kind: TitleKind,
    pub season_count: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
