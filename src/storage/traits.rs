//! Storage traits and error types
//!
//! This module defines the trait interface for document store backends and
//! associated error types.

use crate::storage::CrawledDocument;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document store implementations
///
/// The crawler writes each retrieved document exactly once; the indexer
/// reads the whole corpus back. Implementations must be usable from many
/// crawl tasks at once.
pub trait DocumentStore: Send + Sync {
    /// Persists one document, keyed by its URL
    ///
    /// Saving a URL that already exists replaces the stored document.
    fn save(&self, document: &CrawledDocument) -> StorageResult<()>;

    /// Loads every stored document
    ///
    /// Order is backend-defined (directory order for file stores).
    fn load_all(&self) -> StorageResult<Vec<CrawledDocument>>;

    /// Loads a single document by URL
    fn load(&self, url: &str) -> StorageResult<CrawledDocument>;

    /// Number of stored documents
    fn count(&self) -> StorageResult<usize>;
}
