use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vectorizer::stop_words::StopWords;

/// Upper bound on vocabulary size used by the default configuration.
pub const DEFAULT_MAX_FEATURES: usize = 5000;
/// Number of leading cast members kept per item.
pub const DEFAULT_CAST_LIMIT: usize = 3;
/// Crew job whose members contribute tags.
pub const DEFAULT_CREW_ROLE: &str = "Director";
/// Number of titles returned by a plain `recommend` call.
pub const DEFAULT_TOP_N: usize = 5;

/// Build and query parameters for a [`RecommendationIndex`](crate::RecommendationIndex).
///
/// Every field has a default, so a JSON config file only needs the keys it
/// overrides:
///
/// ```json
/// { "max_features": 2000, "stop_words": { "custom": ["foo", "bar"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Maximum vocabulary size
    pub max_features: usize,
    /// Cast members kept per item (positional, first `cast_limit` in source order)
    pub cast_limit: usize,
    /// Crew `job` value selecting crew tags
    pub crew_role: String,
    /// Result count for `recommend` without an explicit count
    pub default_top_n: usize,
    /// Stopwords removed before vocabulary selection
    pub stop_words: StopWords,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            cast_limit: DEFAULT_CAST_LIMIT,
            crew_role: DEFAULT_CREW_ROLE.to_string(),
            default_top_n: DEFAULT_TOP_N,
            stop_words: StopWords::English,
        }
    }
}

impl RecommenderConfig {
    /// Read a JSON config file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::Invalid {
                field: "max_features",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.crew_role.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "crew_role",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
