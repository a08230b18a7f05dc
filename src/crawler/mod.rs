//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` seam
//! - HTML text cleaning and link extraction
//! - Bounded concurrent crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{crawl, Coordinator, CrawlOutcome, CrawlSettings, CrawlTask};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use parser::{clean_text, extract_links};
