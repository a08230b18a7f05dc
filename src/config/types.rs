use serde::Deserialize;

/// Main configuration structure for Ripple-Search
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub links: LinkConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page the crawl starts from (depth 0)
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Links of a page are only followed when its text contains this keyword
    pub keyword: String,

    /// Maximum link distance from the seed page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of documents retrieved in one crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Upper bound for a single fetch (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Which discovered links count as same-site article links
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// Host pattern (e.g., "en.wikipedia.org" or "*.wikipedia.org").
    /// Defaults to the seed URL's host.
    #[serde(default)]
    pub site: Option<String>,

    /// Required path prefix for followed links
    #[serde(rename = "path-prefix", default = "default_path_prefix")]
    pub path_prefix: String,

    /// Links whose path contains any of these characters are dropped
    #[serde(rename = "excluded-path-chars", default = "default_excluded_path_chars")]
    pub excluded_path_chars: Vec<char>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            site: None,
            path_prefix: default_path_prefix(),
            excluded_path_chars: default_excluded_path_chars(),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per crawled document
    #[serde(rename = "documents-dir")]
    pub documents_dir: String,
}

/// Ranking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// BM25 term saturation parameter
    #[serde(default = "default_k1")]
    pub k1: f64,

    /// BM25 length normalization parameter
    #[serde(default = "default_b")]
    pub b: f64,

    /// Number of hits returned per query
    #[serde(rename = "max-results", default = "default_max_results")]
    pub max_results: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            max_results: default_max_results(),
        }
    }
}

fn default_max_concurrent_fetches() -> usize {
    8
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_path_prefix() -> String {
    "/".to_string()
}

fn default_excluded_path_chars() -> Vec<char> {
    vec![':']
}

fn default_k1() -> f64 {
    1.5
}

fn default_b() -> f64 {
    0.75
}

fn default_max_results() -> usize {
    10
}
