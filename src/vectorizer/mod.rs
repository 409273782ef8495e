pub mod analyzer;
pub mod corpus;
pub mod stop_words;
pub mod vocabulary;

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{analyzer::Analyzer, corpus::TermCounts, stop_words::StopWords, vocabulary::Vocabulary};

/// Integer count vector over a [`Vocabulary`].
///
/// Entry `k` counts the occurrences of vocabulary term `k` in one item's tags.
/// Dense, since the similarity pass walks every dimension anyway.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    pub fn new(counts: Vec<u32>) -> Self {
        FeatureVector(counts)
    }

    pub fn zeros(dims: usize) -> Self {
        FeatureVector(vec![0; dims])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.0.iter().filter(|&&c| c != 0).count()
    }

    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&c| {
                let c = c as f64;
                c * c
            })
            .sum::<f64>()
            .sqrt()
    }
}

/// Token-count vectorizer.
///
/// `fit` scans the whole corpus once and fixes the vocabulary; `transform`
/// then maps any token sequence to a vector of exactly `vocabulary().len()`
/// entries. Terms outside the vocabulary are ignored.
///
/// # Examples
/// ```
/// use tag_recommender::vectorizer::{CountVectorizer, stop_words::StopWords};
///
/// let mut vectorizer = CountVectorizer::new(&StopWords::English, 5000);
/// vectorizer.fit(&[vec!["space", "hero"], vec!["the", "hero"]]);
/// assert_eq!(vectorizer.vocabulary().len(), 2);
/// assert_eq!(vectorizer.transform(&["hero", "hero", "unknown"]).as_slice(), &[2, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    analyzer: Analyzer,
    stop_words: HashSet<String>,
    max_features: usize,
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    pub fn new(stop_words: &StopWords, max_features: usize) -> Self {
        Self {
            analyzer: Analyzer::new(),
            stop_words: stop_words.to_set(),
            max_features,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Build the vocabulary from the whole corpus.
    ///
    /// Calling `fit` again replaces the vocabulary wholesale.
    pub fn fit<D, T>(&mut self, corpus: &[D]) -> &Vocabulary
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut counts = TermCounts::new();
        for doc in corpus {
            let terms = self.analyzer.analyze(doc.as_ref());
            counts.add_doc(&terms, &self.stop_words);
        }
        self.vocabulary = Vocabulary::from_counts(&counts, self.max_features);
        tracing::debug!(
            docs = counts.doc_num,
            distinct_terms = counts.vocab_size(),
            vocabulary = self.vocabulary.len(),
            "vocabulary fitted"
        );
        &self.vocabulary
    }

    /// Count vector of `tokens` over the fitted vocabulary.
    pub fn transform<T>(&self, tokens: &[T]) -> FeatureVector
    where
        T: AsRef<str>,
    {
        let mut counts = vec![0u32; self.vocabulary.len()];
        for term in self.analyzer.analyze(tokens) {
            if let Some(idx) = self.vocabulary.index_of(&term) {
                counts[idx] += 1;
            }
        }
        FeatureVector(counts)
    }

    /// Fit on `corpus`, then transform every document.
    /// Documents are transformed in parallel; output order follows input order.
    pub fn fit_transform<D, T>(&mut self, corpus: &[D]) -> Vec<FeatureVector>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str>,
    {
        self.fit(corpus);
        corpus.par_iter().map(|doc| self.transform(doc.as_ref())).collect()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }
}
