use std::collections::HashSet;

use indexmap::IndexMap;

/// Term occurrence counts over the whole corpus.
///
/// Unlike a document-frequency table this counts every occurrence, since
/// vocabulary selection ranks by total frequency. Terms keep the order in
/// which the corpus scan first met them, which is the tie-break rule of
/// [`TermCounts::ranked`].
#[derive(Debug, Clone, Default)]
pub struct TermCounts {
    /// number of documents scanned
    pub doc_num: u64,
    term_counts: IndexMap<Box<str>, u64>,
}

impl TermCounts {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document's terms, skipping stopwords.
    pub fn add_doc<T>(&mut self, terms: &[T], stop_words: &HashSet<String>)
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            let term = term.as_ref();
            if stop_words.contains(term) {
                continue;
            }
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Get the occurrence count of a term
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Terms by descending count; equal counts stay in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut list: Vec<(&str, u64)> = self
            .term_counts
            .iter()
            .map(|(term, &count)| (term.as_ref(), count))
            .collect();
        // stable sort keeps insertion order among ties
        list.sort_by(|a, b| b.1.cmp(&a.1));
        list
    }
}
