use std::collections::HashSet;

use crate::{error::MetadataError, metadata::item::Item};

/// An item dropped from the corpus during the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    /// position in the raw input
    pub position: usize,
    pub id: Option<u64>,
    pub title: Option<String>,
    pub error: MetadataError,
}

/// Outcome of the build phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub accepted: usize,
    pub excluded: Vec<Exclusion>,
    /// Titles shared by more than one accepted item, in first-seen order.
    /// Lookup only ever reaches the first of them.
    pub duplicate_titles: Vec<String>,
    pub vocabulary_size: usize,
}

impl BuildReport {
    pub(crate) fn duplicate_titles(items: &[Item]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for item in items {
            if !seen.insert(item.title.as_str()) && reported.insert(item.title.as_str()) {
                duplicates.push(item.title.clone());
            }
        }
        duplicates
    }
}
