/// This crate is a content-based item recommender built on tag count vectors.
pub mod config;
pub mod error;
pub mod metadata;
pub mod recommend;
pub mod similarity;
pub mod snapshot;
pub mod tags;
pub mod vectorizer;

/// Recommendation Index
/// The top-level struct of this crate. It is built once from raw catalog
/// metadata and then answers "more like this" queries by looking up a
/// precomputed similarity matrix.
///
/// Internally, it holds:
/// - The catalog items with their composed tags
/// - The vocabulary fixing the feature dimensions
/// - One count vector per item
/// - The full pairwise cosine similarity matrix
/// - The build report (accepted and excluded items)
///
/// # Thread Safety
/// Immutable after `initialize`, so it can be shared across threads by
/// reference or `Arc` without locking.
///
/// # Serialization
/// Supported through `save`/`to_cbor`; restore with `load`/`from_cbor`,
/// which go through `IndexData`.
pub use recommend::{initialize, recommend, RecommendationIndex};

/// Ranked results
/// - `Hits`: ordered recommendations, best first
/// - `HitEntry`: one result, carrying corpus index, title and score
pub use recommend::hits::{HitEntry, Hits};

/// Build Report
/// Lists items excluded during the build together with the reason, and
/// titles shared by more than one item.
pub use recommend::report::{BuildReport, Exclusion};

/// Configuration
/// Vocabulary size, cast limit, crew role, default result count and stopwords.
pub use config::RecommenderConfig;

/// Raw and built catalog items
pub use metadata::item::{Item, RawItem};

/// Tag Composer
/// Turns raw metadata into the ordered tag sequence of an item.
pub use tags::TagComposer;

/// Count Vectorizer
/// Fits a frequency-ranked vocabulary over the corpus and produces count
/// vectors of fixed length.
pub use vectorizer::{stop_words::StopWords, vocabulary::Vocabulary, CountVectorizer, FeatureVector};

/// Similarity Engine
/// Cosine similarity of count vectors and the cached pairwise matrix.
pub use similarity::{compute_matrix, cosine, SimilarityMatrix};

/// Errors
pub use error::{BuildError, ConfigError, MetadataError, RecommendError, SnapshotError};
