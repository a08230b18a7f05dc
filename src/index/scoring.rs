//! Pluggable scoring strategies
//!
//! The engine hands each strategy one [`TermContext`] per (query token,
//! document) pair and sums the contributions.

/// Statistics available when scoring one query token against one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermContext {
    /// Postings of the token across the whole index
    pub posting_count: usize,

    /// Mean posting-list length over every indexed term
    pub mean_posting_length: f64,

    /// Occurrences of the token in the scored document
    pub term_frequency: usize,

    /// Token count of the scored document
    pub document_length: usize,

    /// Number of indexed documents
    pub document_count: usize,

    /// Mean token count over indexed documents
    pub mean_document_length: f64,
}

/// Computes the contribution of one query token to one document's score
pub trait ScoringStrategy: Send + Sync {
    /// Short name used in logs and statistics
    fn name(&self) -> &'static str;

    fn score(&self, term: &TermContext) -> f64;
}

/// Simplified BM25
///
/// ```text
/// (k1 + 1) / (k1 * ((1 - b) + b * (posting_count / mean_posting_length)) + 1)
/// ```
///
/// This is an approximation: the term's global posting count stands in for
/// the per-document term frequency, and the mean posting-list length stands
/// in for the mean document length. There is no inverse document frequency
/// factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifiedBm25 {
    pub k1: f64,
    pub b: f64,
}

impl SimplifiedBm25 {
    pub const DEFAULT_K1: f64 = 1.5;
    pub const DEFAULT_B: f64 = 0.75;

    pub fn new(k1: f64, b: f64) -> Self {
        Self { k1, b }
    }
}

impl Default for SimplifiedBm25 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K1, Self::DEFAULT_B)
    }
}

impl ScoringStrategy for SimplifiedBm25 {
    fn name(&self) -> &'static str {
        "simplified-bm25"
    }

    fn score(&self, term: &TermContext) -> f64 {
        if term.mean_posting_length <= 0.0 {
            return 0.0;
        }

        let ratio = term.posting_count as f64 / term.mean_posting_length;
        (self.k1 + 1.0) / (self.k1 * ((1.0 - self.b) + self.b * ratio) + 1.0)
    }
}

/// Raw term frequency, no ranking normalization
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TermFrequency;

impl ScoringStrategy for TermFrequency {
    fn name(&self) -> &'static str {
        "term-frequency"
    }

    fn score(&self, term: &TermContext) -> f64 {
        term.term_frequency as f64
    }
}
