use thiserror::Error;

/// Per-item failures raised while normalizing raw metadata.
/// Any of these excludes the whole item from the corpus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("field `{field}` does not match the record shape: {message}")]
    Parse { field: &'static str, message: String },
    #[error("item is missing required field `{field}`")]
    IncompleteRecord { field: &'static str },
}

impl MetadataError {
    pub(crate) fn parse(field: &'static str, err: impl std::fmt::Display) -> Self {
        MetadataError::Parse { field, message: err.to_string() }
    }
}

/// Query-time failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("title not found: {0}")]
    NotFound(String),
}

/// Build-time failures that abort the whole build.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("corpus is empty after excluding {excluded} item(s)")]
    EmptyCorpus { excluded: usize },
    /// Internal invariant violation: fit and transform share one vocabulary,
    /// so this only surfaces on a bug or a corrupted snapshot.
    #[error("feature vector {row} has length {found}, vocabulary has {expected}")]
    DimensionMismatch { expected: usize, found: usize, row: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("snapshot is inconsistent: {0}")]
    Corrupt(#[from] BuildError),
    #[error("snapshot holds {items} items but {found} {what}")]
    Shape { items: usize, found: usize, what: &'static str },
}

impl RecommendError {
    /// Stable code the request layer maps to a client response.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}
