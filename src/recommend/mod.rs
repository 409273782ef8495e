pub mod hits;
pub mod report;

use std::time::Instant;

use crate::{
    config::RecommenderConfig,
    error::{BuildError, RecommendError},
    metadata::item::{Item, RawItem},
    recommend::{
        hits::{HitEntry, Hits},
        report::{BuildReport, Exclusion},
    },
    similarity::SimilarityMatrix,
    tags::TagComposer,
    vectorizer::{vocabulary::Vocabulary, CountVectorizer, FeatureVector},
};

/// A page of catalog titles in corpus order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage<'a> {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// total number of items in the catalog
    pub total: usize,
    pub titles: Vec<&'a str>,
}

/// The built, query-ready recommendation index.
///
/// Produced once by [`RecommendationIndex::initialize`] and immutable after
/// that: queries only read it, so one index can be shared by reference (or
/// behind an `Arc`) across any number of threads without locking. A changed
/// catalog means building a new index.
#[derive(Debug, Clone)]
pub struct RecommendationIndex {
    pub(crate) items: Vec<Item>,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) vectors: Vec<FeatureVector>,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) default_top_n: usize,
    pub(crate) report: BuildReport,
}

impl RecommendationIndex {
    /// Run the whole build: normalize and compose tags, fit the vocabulary,
    /// transform every item and compute the similarity matrix.
    ///
    /// Items with missing or malformed metadata are excluded and listed in
    /// [`BuildReport::excluded`]; the build only fails when nothing is left
    /// or on an internal dimension mismatch.
    pub fn initialize(raw_items: &[RawItem], config: &RecommenderConfig) -> Result<Self, BuildError> {
        Self::build(raw_items.iter().map(Ok), config)
    }

    /// Like [`initialize`](Self::initialize), for catalog records that have
    /// not been decoded yet. A record that does not decode as a [`RawItem`]
    /// is excluded on its own, with the same reporting as any other bad item.
    pub fn initialize_from_values(values: &[serde_json::Value], config: &RecommenderConfig) -> Result<Self, BuildError> {
        let decoded: Vec<Result<RawItem, Exclusion>> = values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                RawItem::from_value(value).map_err(|error| Exclusion {
                    position,
                    id: value.get("id").or_else(|| value.get("movie_id")).and_then(|v| v.as_u64()),
                    title: value.get("title").and_then(|v| v.as_str()).map(str::to_string),
                    error,
                })
            })
            .collect();
        Self::build(decoded.iter().map(|entry| entry.as_ref().map_err(|e| e.clone())), config)
    }

    fn build<'a, I>(entries: I, config: &RecommenderConfig) -> Result<Self, BuildError>
    where
        I: Iterator<Item = Result<&'a RawItem, Exclusion>>,
    {
        let started = Instant::now();
        let composer = TagComposer::from_config(config);

        let mut items = Vec::new();
        let mut excluded = Vec::new();
        for (position, entry) in entries.enumerate() {
            let exclusion = match entry {
                Ok(raw) => match composer.compose(raw) {
                    Ok(item) => {
                        items.push(item);
                        continue;
                    }
                    Err(error) => Exclusion {
                        position,
                        id: raw.id,
                        title: raw.title.clone(),
                        error,
                    },
                },
                Err(exclusion) => exclusion,
            };
            tracing::debug!(
                position,
                id = ?exclusion.id,
                title = ?exclusion.title,
                error = %exclusion.error,
                "excluding item"
            );
            excluded.push(exclusion);
        }
        if !excluded.is_empty() {
            tracing::warn!(excluded = excluded.len(), "items excluded from the corpus");
        }
        if items.is_empty() {
            return Err(BuildError::EmptyCorpus {
                excluded: excluded.len(),
            });
        }
        let composed = Instant::now();

        let mut vectorizer = CountVectorizer::new(&config.stop_words, config.max_features);
        let tags: Vec<&[String]> = items.iter().map(|item| item.tags.as_slice()).collect();
        let vectors = vectorizer.fit_transform(&tags);
        let vocabulary = vectorizer.into_vocabulary();
        let vectorized = Instant::now();

        let similarity = SimilarityMatrix::compute(&vectors, vocabulary.len())?;
        let computed = Instant::now();

        let duplicate_titles = BuildReport::duplicate_titles(&items);
        if !duplicate_titles.is_empty() {
            tracing::warn!(
                count = duplicate_titles.len(),
                titles = ?duplicate_titles,
                "duplicate titles: lookups resolve to the first occurrence"
            );
        }

        tracing::info!(
            items = items.len(),
            excluded = excluded.len(),
            vocabulary = vocabulary.len(),
            compose_ms = composed.duration_since(started).as_secs_f64() * 1000.0,
            vectorize_ms = vectorized.duration_since(composed).as_secs_f64() * 1000.0,
            similarity_ms = computed.duration_since(vectorized).as_secs_f64() * 1000.0,
            "recommendation index ready"
        );

        let report = BuildReport {
            accepted: items.len(),
            excluded,
            duplicate_titles,
            vocabulary_size: vocabulary.len(),
        };
        Ok(Self {
            items,
            vocabulary,
            vectors,
            similarity,
            default_top_n: config.default_top_n,
            report,
        })
    }

    /// Index of the first item whose title equals `title` exactly.
    ///
    /// Items sharing a title are not disambiguated: only the first is
    /// reachable (see [`BuildReport::duplicate_titles`]).
    pub fn lookup(&self, title: &str) -> Result<usize, RecommendError> {
        self.items
            .iter()
            .position(|item| item.title == title)
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))
    }

    /// Up to `n` titles most similar to `title`, best first.
    pub fn recommend(&self, title: &str, n: usize) -> Result<Vec<String>, RecommendError> {
        Ok(self.recommend_scored(title, n)?.titles())
    }

    /// Like [`recommend`](Self::recommend), with scores and corpus indices.
    ///
    /// Every other item is ranked by similarity, descending; equal scores keep
    /// corpus order. The query item itself is never returned.
    pub fn recommend_scored(&self, title: &str, n: usize) -> Result<Hits, RecommendError> {
        let index = self.lookup(title)?;
        let mut ranked: Vec<(usize, f64)> = self
            .similarity
            .row(index)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, _)| j != index)
            .collect();
        // stable: ties stay in corpus order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        tracing::debug!(title, index, returned = ranked.len(), "recommend");
        Ok(Hits::new(
            ranked
                .into_iter()
                .map(|(j, score)| HitEntry {
                    index: j,
                    title: self.items[j].title.clone(),
                    score,
                })
                .collect(),
        ))
    }

    /// Similarity between two titles (first match of each).
    pub fn similarity_between(&self, a: &str, b: &str) -> Result<f64, RecommendError> {
        Ok(self.similarity.get(self.lookup(a)?, self.lookup(b)?))
    }

    /// One page of the catalog. Pages are 1-based; an out-of-range page is empty.
    pub fn page(&self, page: usize, per_page: usize) -> CatalogPage<'_> {
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let titles = if page == 0 {
            Vec::new()
        } else {
            self.titles().skip(start).take(per_page).collect()
        };
        CatalogPage {
            page,
            per_page,
            total: self.items.len(),
            titles,
        }
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build a ready index from raw catalog items.
pub fn initialize(raw_items: &[RawItem], config: &RecommenderConfig) -> Result<RecommendationIndex, BuildError> {
    RecommendationIndex::initialize(raw_items, config)
}

/// The configured default number of recommendations for `title`.
pub fn recommend(index: &RecommendationIndex, title: &str) -> Result<Vec<String>, RecommendError> {
    index.recommend(title, index.default_top_n)
}
