//! Statistics of a built index
//!
//! This module provides functionality for extracting and displaying
//! corpus statistics from an `IndexEngine`.

use crate::index::IndexEngine;

/// Index statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStatistics {
    /// Scoring strategy in use
    pub strategy: &'static str,

    /// Number of indexed documents
    pub documents: usize,

    /// Number of distinct terms
    pub terms: usize,

    /// Total postings (token occurrences)
    pub postings: usize,

    /// Mean tokens per document
    pub mean_document_length: f64,

    /// Mean postings per term
    pub mean_posting_length: f64,
}

/// Loads statistics from an index
pub fn load_statistics(engine: &IndexEngine) -> IndexStatistics {
    IndexStatistics {
        strategy: engine.strategy_name(),
        documents: engine.document_count(),
        terms: engine.term_count(),
        postings: engine.posting_count(),
        mean_document_length: engine.mean_document_length(),
        mean_posting_length: engine.mean_posting_length(),
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Scoring: {}", stats.strategy);
    println!("  Documents indexed: {}", stats.documents);
    println!("  Distinct terms: {}", stats.terms);
    println!("  Total postings: {}", stats.postings);
    println!();

    println!("Averages:");
    println!("  Tokens per document: {:.2}", stats.mean_document_length);
    println!("  Postings per term: {:.2}", stats.mean_posting_length);
}
