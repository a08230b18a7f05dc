use crate::storage::traits::{DocumentStore, StorageError, StorageResult};
use crate::storage::CrawledDocument;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process document store, kept in save order
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<CrawledDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs of every stored document, in save order
    pub fn urls(&self) -> Vec<String> {
        self.lock().iter().map(|d| d.url.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CrawledDocument>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn save(&self, document: &CrawledDocument) -> StorageResult<()> {
        let mut documents = self.lock();
        match documents.iter_mut().find(|d| d.url == document.url) {
            Some(existing) => existing.content = document.content.clone(),
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    fn load_all(&self) -> StorageResult<Vec<CrawledDocument>> {
        Ok(self.lock().clone())
    }

    fn load(&self, url: &str) -> StorageResult<CrawledDocument> {
        self.lock()
            .iter()
            .find(|d| d.url == url)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(url.to_string()))
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.lock().len())
    }
}
