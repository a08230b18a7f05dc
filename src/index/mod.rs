//! Term index, ranking and snippets
//!
//! - `engine`: tokenizer and the inverted `IndexEngine`
//! - `scoring`: pluggable `ScoringStrategy` implementations
//! - `snippet`: query-highlighted excerpts of document text

mod engine;
mod scoring;
mod snippet;

pub use engine::{tokenize, IndexEngine, ScoredResult};
pub use scoring::{ScoringStrategy, SimplifiedBm25, TermContext, TermFrequency};
pub use snippet::{snippet, NO_SNIPPET};
