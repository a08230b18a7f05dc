//! Storage module for persisting crawled documents
//!
//! This module handles everything the crawler hands off after a page is
//! retrieved:
//! - The `CrawledDocument` record (url + cleaned text)
//! - The `DocumentStore` trait the coordinator and indexer depend on
//! - A JSON-file-per-document store and an in-memory store

mod json_store;
mod memory;
mod traits;

pub use json_store::{document_file_name, JsonFileStore};
pub use memory::MemoryStore;
pub use traits::{DocumentStore, StorageError, StorageResult};

use serde::{Deserialize, Serialize};

/// One retrieved page, as persisted and indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledDocument {
    /// Normalized URL the page was fetched from
    pub url: String,

    /// Cleaned plain text of the page
    pub content: String,
}

impl CrawledDocument {
    /// Creates a new document
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}
