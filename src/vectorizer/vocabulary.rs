use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::vectorizer::corpus::TermCounts;

/// Fixed, ordered set of terms defining the feature dimensions.
///
/// Dimension `k` is the `k`-th term in lexicographic order. The vocabulary is
/// built exactly once by [`Vocabulary::from_counts`] and never changes after.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Select at most `max_features` terms by total corpus frequency.
    ///
    /// Ties in frequency are resolved by first appearance in the corpus scan,
    /// so the same corpus always yields the same vocabulary.
    pub fn from_counts(counts: &TermCounts, max_features: usize) -> Self {
        let mut selected: Vec<&str> = counts
            .ranked()
            .into_iter()
            .take(max_features)
            .map(|(term, _)| term)
            .collect();
        selected.sort_unstable();
        Self {
            terms: selected.into_iter().map(Box::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn counts(docs: &[&[&str]]) -> TermCounts {
        let mut counts = TermCounts::new();
        for doc in docs {
            counts.add_doc(doc, &HashSet::new());
        }
        counts
    }

    #[test]
    fn dimensions_are_sorted() {
        let vocab = Vocabulary::from_counts(&counts(&[&["space", "hero", "action"]]), 10);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["action", "hero", "space"]);
        assert_eq!(vocab.index_of("hero"), Some(1));
        assert_eq!(vocab.term(2), Some("space"));
        assert_eq!(vocab.term(3), None);
    }

    #[test]
    fn truncates_by_frequency_then_first_seen() {
        // frequencies: hero 3, space 2, zulu 1, alpha 1
        let c = counts(&[&["zulu", "hero", "space"], &["hero", "alpha", "space", "hero"]]);
        let vocab = Vocabulary::from_counts(&c, 3);
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("zulu"));
        assert!(!vocab.contains("alpha"));
    }

    #[test]
    fn identical_corpus_identical_vocabulary() {
        let docs: &[&[&str]] = &[&["b", "a", "c"], &["c", "d"]];
        assert_eq!(
            Vocabulary::from_counts(&counts(docs), 2),
            Vocabulary::from_counts(&counts(docs), 2)
        );
    }
}
