use super::ApiError;
use crate::domain::TitleId;
use crate::entities::TitleKind;

const INVALID_DATA: &str = "Dados inválidos";

pub fn validate_title_id(id: i32) -> Result<TitleId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid title ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(TitleId::new(id))
}

/// Parses an id taken from the URL path. Anything that cannot name a stored
/// title is reported as not found, like an unknown id.
pub fn parse_path_title_id(resource: &str, raw: &str) -> Result<TitleId, ApiError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .map(TitleId::new)
        .ok_or_else(|| ApiError::not_found(resource, raw))
}

/// Parses a form `serie_id`.
pub fn parse_title_id(raw: Option<&str>) -> Result<TitleId, ApiError> {
    let id = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("serie_id is required"))?
        .parse::<i32>()
        .map_err(|_| ApiError::validation(INVALID_DATA))?;
    validate_title_id(id)
}

/// `tipo` must be `filme` or `serie`.
pub fn parse_kind(raw: Option<&str>) -> Result<TitleKind, ApiError> {
    raw.filter(|s| matches!(s.trim(), "filme" | "serie"))
        .and_then(TitleKind::from_form)
        .ok_or_else(|| ApiError::validation(INVALID_DATA))
}

pub fn parse_tmdb_id(raw: Option<&str>) -> Result<i64, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation(INVALID_DATA))
}

/// Blank years are allowed; anything else must be a number.
pub fn parse_year(raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ApiError::validation(format!("Invalid year: {}", value))),
    }
}

pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    let trimmed = query.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ApiError::validation(INVALID_DATA));
    }
    Ok(trimmed)
}
