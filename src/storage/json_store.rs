//! JSON file document store
//!
//! Each document lives in its own file under the store directory, named
//! after its URL, holding `{"url": ..., "content": ...}`.

use crate::storage::traits::{DocumentStore, StorageError, StorageResult};
use crate::storage::CrawledDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Document store writing one JSON file per document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`
    ///
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the document files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file a URL is stored in
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(document_file_name(url))
    }

    fn read_document(path: &Path) -> StorageResult<CrawledDocument> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Filesystem-safe file name for a URL
///
/// The scheme is stripped and every `/` becomes `_`.
///
/// # Examples
///
/// ```
/// use ripple_search::storage::document_file_name;
///
/// assert_eq!(
///     document_file_name("https://en.wikipedia.org/wiki/Web_crawler"),
///     "en.wikipedia.org_wiki_Web_crawler.json"
/// );
/// ```
pub fn document_file_name(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    format!("{}.json", without_scheme.replace('/', "_"))
}

impl DocumentStore for JsonFileStore {
    fn save(&self, document: &CrawledDocument) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(document)?;
        fs::write(self.path_for(&document.url), json)?;
        Ok(())
    }

    fn load_all(&self) -> StorageResult<Vec<CrawledDocument>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match Self::read_document(&path) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), e);
                }
            }
        }

        Ok(documents)
    }

    fn load(&self, url: &str) -> StorageResult<CrawledDocument> {
        match Self::read_document(&self.path_for(url)) {
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(url.to_string()))
            }
            other => other,
        }
    }

    fn count(&self) -> StorageResult<usize> {
        self.load_all().map(|documents| documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_strips_scheme() {
        assert_eq!(
            document_file_name("http://127.0.0.1:8080/wiki/A"),
            "127.0.0.1:8080_wiki_A.json"
        );
        assert_eq!(document_file_name("https://example.com/"), "example.com_.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("documents"));
        let document = CrawledDocument::new("https://example.com/wiki/Cat", "The cat sat.");

        store.save(&document).unwrap();

        let raw = fs::read_to_string(store.path_for(&document.url)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["url"], "https://example.com/wiki/Cat");
        assert_eq!(json["content"], "The cat sat.");

        assert_eq!(store.load(&document.url).unwrap(), document);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_load_all_reads_every_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .save(&CrawledDocument::new("https://example.com/wiki/A", "alpha"))
            .unwrap();
        store
            .save(&CrawledDocument::new("https://example.com/wiki/B", "beta"))
            .unwrap();

        let mut urls: Vec<String> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|d| d.url)
            .collect();
        urls.sort();
        assert_eq!(
            urls,
            vec!["https://example.com/wiki/A", "https://example.com/wiki/B"]
        );
    }

    #[test]
    fn test_load_all_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .save(&CrawledDocument::new("https://example.com/wiki/A", "alpha"))
            .unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let documents = store.load_all().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content, "alpha");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("does-not-exist"));
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_load_missing_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load("https://example.com/wiki/Nope"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .save(&CrawledDocument::new("https://example.com/wiki/A", "old"))
            .unwrap();
        store
            .save(&CrawledDocument::new("https://example.com/wiki/A", "new"))
            .unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.load("https://example.com/wiki/A").unwrap().content, "new");
    }
}
