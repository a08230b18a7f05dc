//! Inverted index over crawled documents

use crate::index::scoring::{ScoringStrategy, SimplifiedBm25, TermContext};
use crate::storage::{DocumentStore, StorageResult};
use std::collections::HashMap;
use std::fmt;

/// Splits text into index tokens
///
/// Tokens are lowercased whitespace-separated words with leading and
/// trailing non-alphanumeric characters trimmed; tokens left empty are
/// dropped.
///
/// # Example
///
/// ```
/// use ripple_search::index::tokenize;
///
/// assert_eq!(tokenize("The Cat (sat)."), vec!["the", "cat", "sat"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub url: String,
    pub score: f64,
}

/// Term index with pluggable scoring
///
/// Postings keep one entry per token occurrence, so a term's posting count
/// is its total frequency across the corpus. Indexing the same URL twice is
/// not guarded against; callers index each document once.
pub struct IndexEngine {
    strategy: Box<dyn ScoringStrategy>,
    postings: HashMap<String, Vec<String>>,
    document_lengths: HashMap<String, usize>,
    document_count: usize,
    total_postings: usize,
}

impl fmt::Debug for IndexEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexEngine")
            .field("strategy", &self.strategy.name())
            .field("documents", &self.document_count)
            .field("terms", &self.postings.len())
            .field("postings", &self.total_postings)
            .finish()
    }
}

impl IndexEngine {
    pub fn new(strategy: Box<dyn ScoringStrategy>) -> Self {
        Self {
            strategy,
            postings: HashMap::new(),
            document_lengths: HashMap::new(),
            document_count: 0,
            total_postings: 0,
        }
    }

    /// Engine ranking with [`SimplifiedBm25`]
    pub fn with_bm25(k1: f64, b: f64) -> Self {
        Self::new(Box::new(SimplifiedBm25::new(k1, b)))
    }

    /// Adds one document to the index
    pub fn index_document(&mut self, url: &str, text: &str) {
        let tokens = tokenize(text);

        self.document_lengths.insert(url.to_string(), tokens.len());
        self.document_count += 1;
        self.total_postings += tokens.len();

        for token in tokens {
            self.postings.entry(token).or_default().push(url.to_string());
        }
    }

    /// Indexes every document of a store, in the store's load order
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of documents indexed
    /// * `Err(StorageError)` - The store could not be read
    pub fn index_store(&mut self, store: &dyn DocumentStore) -> StorageResult<usize> {
        let documents = store.load_all()?;
        for document in &documents {
            self.index_document(&document.url, &document.content);
        }

        tracing::debug!(
            "Indexed {} documents ({} terms, {} postings)",
            documents.len(),
            self.term_count(),
            self.total_postings
        );

        Ok(documents.len())
    }

    /// Scores every document matching the query
    ///
    /// Absent query tokens contribute nothing. An empty query or an empty
    /// index yields an empty map. Scores are rounded to three decimals.
    pub fn search(&self, query: &str) -> HashMap<String, f64> {
        self.score_documents(query).into_iter().collect()
    }

    /// Scores matching documents, best first, keeping at most `limit`
    ///
    /// Equal scores keep the order in which documents first appear in the
    /// postings of the query tokens.
    pub fn ranked(&self, query: &str, limit: usize) -> Vec<ScoredResult> {
        let mut results: Vec<ScoredResult> = self
            .score_documents(query)
            .into_iter()
            .map(|(url, score)| ScoredResult { url, score })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        results
    }

    fn score_documents(&self, query: &str) -> Vec<(String, f64)> {
        let tokens = tokenize(query);
        if tokens.is_empty() || self.document_count == 0 || self.postings.is_empty() {
            return Vec::new();
        }

        let mean_posting_length = self.mean_posting_length();
        let mean_document_length = self.mean_document_length();

        let mut order: Vec<&str> = Vec::new();
        let mut scores: HashMap<&str, f64> = HashMap::new();

        for token in &tokens {
            let Some(posting) = self.postings.get(token) else {
                continue;
            };

            for (url, term_frequency) in term_frequencies(posting) {
                let term = TermContext {
                    posting_count: posting.len(),
                    mean_posting_length,
                    term_frequency,
                    document_length: self.document_length(url).unwrap_or(0),
                    document_count: self.document_count,
                    mean_document_length,
                };

                let score = scores.entry(url).or_insert_with(|| {
                    order.push(url);
                    0.0
                });
                *score += self.strategy.score(&term);
            }
        }

        order
            .into_iter()
            .map(|url| (url.to_string(), round_score(scores[url])))
            .collect()
    }

    /// Name of the scoring strategy in use
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Number of `index_document` calls
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Total postings across all terms
    pub fn posting_count(&self) -> usize {
        self.total_postings
    }

    /// Postings of one term
    pub fn term_posting_count(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// Token count of an indexed document
    pub fn document_length(&self, url: &str) -> Option<usize> {
        self.document_lengths.get(url).copied()
    }

    /// Mean token count per indexed document
    pub fn mean_document_length(&self) -> f64 {
        if self.document_lengths.is_empty() {
            return 0.0;
        }
        let total: usize = self.document_lengths.values().sum();
        total as f64 / self.document_lengths.len() as f64
    }

    /// Mean posting-list length per term
    pub fn mean_posting_length(&self) -> f64 {
        if self.postings.is_empty() {
            return 0.0;
        }
        self.total_postings as f64 / self.postings.len() as f64
    }

    /// Indexed URLs, sorted
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.document_lengths.keys().cloned().collect();
        urls.sort();
        urls
    }
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new(Box::new(SimplifiedBm25::default()))
    }
}

/// Distinct URLs of a posting list with their occurrence counts, in first
/// appearance order
fn term_frequencies(posting: &[String]) -> Vec<(&str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for url in posting {
        let count = counts.entry(url.as_str()).or_insert_with(|| {
            order.push(url.as_str());
            0
        });
        *count += 1;
    }

    order.into_iter().map(|url| (url, counts[url])).collect()
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
