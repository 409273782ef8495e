use std::{fs, path::Path};

use serde::{ser::SerializeStruct, Deserialize, Serialize};

use crate::{
    error::{BuildError, SnapshotError},
    metadata::item::Item,
    recommend::{report::BuildReport, RecommendationIndex},
    similarity::SimilarityMatrix,
    vectorizer::{vocabulary::Vocabulary, FeatureVector},
};

/// Deserialization form of a [`RecommendationIndex`].
///
/// Holds the built state without the build report. Convert it back with
/// [`IndexData::into_index`], which re-checks every shape invariant instead of
/// trusting the bytes.
#[derive(Debug, Deserialize)]
pub struct IndexData {
    pub items: Vec<Item>,
    pub vocabulary: Vocabulary,
    pub vectors: Vec<FeatureVector>,
    pub similarity: SimilarityMatrix,
    pub default_top_n: usize,
}

impl IndexData {
    pub fn into_index(self) -> Result<RecommendationIndex, SnapshotError> {
        let items = self.items.len();
        if self.vectors.len() != items {
            return Err(SnapshotError::Shape { items, found: self.vectors.len(), what: "feature vectors" });
        }
        if self.similarity.len() != items {
            return Err(SnapshotError::Shape { items, found: self.similarity.len(), what: "similarity rows" });
        }
        self.similarity.validate()?;
        let dims = self.vocabulary.len();
        if let Some((row, v)) = self.vectors.iter().enumerate().find(|(_, v)| v.len() != dims) {
            return Err(BuildError::DimensionMismatch { expected: dims, found: v.len(), row }.into());
        }

        let report = BuildReport {
            accepted: items,
            excluded: Vec::new(),
            duplicate_titles: BuildReport::duplicate_titles(&self.items),
            vocabulary_size: dims,
        };
        Ok(RecommendationIndex {
            items: self.items,
            vocabulary: self.vocabulary,
            vectors: self.vectors,
            similarity: self.similarity,
            default_top_n: self.default_top_n,
            report,
        })
    }
}

impl Serialize for RecommendationIndex {
    /// The build report is not part of the snapshot.
    /// Deserialize through [`IndexData`].
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("RecommendationIndex", 5)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.serialize_field("vectors", &self.vectors)?;
        state.serialize_field("similarity", &self.similarity)?;
        state.serialize_field("default_top_n", &self.default_top_n)?;
        state.end()
    }
}

impl RecommendationIndex {
    pub fn to_cbor(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let data: IndexData = serde_cbor::from_slice(bytes)?;
        data.into_index()
    }

    /// Write the index to `path` as CBOR.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let bytes = self.to_cbor()?;
        fs::write(path.as_ref(), &bytes)?;
        tracing::info!(path = %path.as_ref().display(), bytes = bytes.len(), "index snapshot written");
        Ok(())
    }

    /// Restore a previously saved index. The restored index replaces a build
    /// wholesale; nothing is recomputed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path.as_ref())?;
        let index = Self::from_cbor(&bytes)?;
        tracing::info!(path = %path.as_ref().display(), items = index.len(), "index snapshot loaded");
        Ok(index)
    }
}
