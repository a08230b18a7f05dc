//! Query boundary
//!
//! Joins index scores with document text into presentable hits.

use crate::index::{snippet, IndexEngine};
use crate::storage::{DocumentStore, StorageResult};
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// One presentable search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub score: f64,
}

/// Answers free-text queries over an indexed corpus
#[derive(Debug)]
pub struct SearchService {
    engine: IndexEngine,
    documents: HashMap<String, String>,
}

impl SearchService {
    /// Wraps an engine and the text of the documents it indexed
    ///
    /// `documents` maps URL to cleaned text and is only used for snippets.
    pub fn new(engine: IndexEngine, documents: HashMap<String, String>) -> Self {
        Self { engine, documents }
    }

    /// Loads every stored document into `engine` and keeps its text
    ///
    /// # Returns
    ///
    /// * `Ok(SearchService)` - Ready to query
    /// * `Err(StorageError)` - The store could not be read
    pub fn from_store(store: &dyn DocumentStore, mut engine: IndexEngine) -> StorageResult<Self> {
        let mut documents = HashMap::new();
        for document in store.load_all()? {
            engine.index_document(&document.url, &document.content);
            documents.insert(document.url, document.content);
        }

        tracing::info!(
            "Indexed {} documents ({} terms)",
            engine.document_count(),
            engine.term_count()
        );

        Ok(Self::new(engine, documents))
    }

    /// Runs a query, returning at most `limit` hits, best first
    pub fn query(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.engine
            .ranked(query, limit)
            .into_iter()
            .map(|result| {
                let text = self.documents.get(&result.url).map_or("", String::as_str);
                SearchHit {
                    title: title_from_url(&result.url),
                    snippet: snippet(text, query),
                    url: result.url,
                    score: result.score,
                }
            })
            .collect()
    }

    pub fn engine(&self) -> &IndexEngine {
        &self.engine
    }
}

/// Human-readable title derived from a URL
///
/// The last non-empty path segment with underscores turned into spaces,
/// or the host when the path is empty.
///
/// # Examples
///
/// ```
/// use ripple_search::search::title_from_url;
///
/// assert_eq!(title_from_url("https://en.wikipedia.org/wiki/Web_crawler"), "Web crawler");
/// assert_eq!(title_from_url("https://example.com/"), "example.com");
/// ```
pub fn title_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.replace('_', " ");
    };

    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|segment| segment.replace('_', " "))
        .or_else(|| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
