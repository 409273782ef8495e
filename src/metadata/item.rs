use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Raw per-item metadata as produced by the catalog loader.
///
/// The four list fields hold the catalog's textual encoding of a list of
/// records (a JSON array of objects). Every field is optional at decode time
/// so a missing one is reported as [`MetadataError::IncompleteRecord`] for
/// that item alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(alias = "movie_id")]
    pub id: Option<u64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

impl RawItem {
    /// Decode one catalog record.
    ///
    /// A record of the wrong shape (a list field given as a native array, a
    /// record carrying both `id` and `movie_id`, a non-object) is a
    /// [`MetadataError::Parse`] on field `item`, so the caller can exclude it
    /// alone instead of rejecting the whole catalog.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, MetadataError> {
        Self::deserialize(value).map_err(|e| MetadataError::parse("item", e))
    }

    pub(crate) fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, MetadataError> {
        value.as_deref().ok_or(MetadataError::IncompleteRecord { field })
    }

    pub(crate) fn require_id(&self) -> Result<u64, MetadataError> {
        self.id.ok_or(MetadataError::IncompleteRecord { field: "id" })
    }

    /// Title, if one is present and non-blank.
    pub(crate) fn require_title(&self) -> Result<&str, MetadataError> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(title),
            _ => Err(MetadataError::IncompleteRecord { field: "title" }),
        }
    }
}

/// A catalog item after tag composition. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub tags: Vec<String>,
}
