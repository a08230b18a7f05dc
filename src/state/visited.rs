use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Set of URLs already processed or in flight during one crawl
///
/// Append-only for the lifetime of a crawl. A URL is claimed by whoever
/// calls [`VisitedSet::insert`] first; every later caller sees `false` and
/// must not schedule it.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not yet visited and now belongs to the caller
    /// * `false` - Another branch already claimed it
    pub fn insert(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if the URL has been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the claimed URLs out, sorted
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }

    // A poisoned set is still consistent: inserts are single operations
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_insert_wins() {
        let visited = VisitedSet::new();
        assert!(visited.insert("https://example.com/wiki/A"));
        assert!(!visited.insert("https://example.com/wiki/A"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_contains_and_snapshot() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());

        visited.insert("https://example.com/wiki/B");
        visited.insert("https://example.com/wiki/A");

        assert!(visited.contains("https://example.com/wiki/A"));
        assert!(!visited.contains("https://example.com/wiki/C"));
        assert_eq!(
            visited.snapshot(),
            vec![
                "https://example.com/wiki/A".to_string(),
                "https://example.com/wiki/B".to_string()
            ]
        );
    }

    #[test]
    fn test_concurrent_claims_are_exclusive() {
        let visited = Arc::new(VisitedSet::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| visited.insert(&format!("https://example.com/wiki/{}", i)))
                        .count()
                })
            })
            .collect();

        let claimed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(claimed, 100);
        assert_eq!(visited.len(), 100);
    }
}
