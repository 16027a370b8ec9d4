//! Strongly typed primitives shared by the catalog services.
//!
//! Title ids and listing page numbers travel through several layers; the
//! newtypes keep them from being mixed up with provider ids or raw counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored title (movie or series).
///
/// # Examples
///
/// ```rust
/// use filmoteca::domain::TitleId;
///
/// let id = TitleId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TitleId(i32);

impl TitleId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TitleId> for i32 {
    fn from(id: TitleId) -> Self {
        id.0
    }
}

impl From<i32> for TitleId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for TitleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for TitleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// 1-based listing page. Anything below 1 clamps to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u64);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub fn new(page: i64) -> Self {
        u64::try_from(page).ok().filter(|p| *p >= 1).map_or(Self::FIRST, Self)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Row offset of this page for the given page size, capped at `i64::MAX`
    /// since SQL backends bind offsets as signed integers.
    #[must_use]
    pub const fn offset(&self, page_size: u64) -> u64 {
        let offset = (self.0 - 1).saturating_mul(page_size);
        let max = i64::MAX.unsigned_abs();
        if offset > max { max } else { offset }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
