//! Crawler coordinator - bounded concurrent traversal
//!
//! Starting from the seed page, every retrieved page spawns one task per
//! newly discovered link (depth + 1) and waits for all of them before it
//! completes. The traversal is bounded three ways:
//! - depth: tasks deeper than `max_depth` are never scheduled
//! - dedup: a URL is claimed in the `VisitedSet` before its task exists
//! - budget: the `PageBudget` hands out at most `max_pages` document slots,
//!   and the task taking the last slot cancels the whole crawl
//!
//! A page whose text lacks the keyword is still stored and counted, but its
//! links are not followed.

use crate::config::Config;
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::parser::{clean_text, extract_links};
use crate::state::{PageBudget, VisitedSet};
use crate::storage::{CrawledDocument, DocumentStore, JsonFileStore};
use crate::url::{normalize_url, LinkFilter};
use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Limits and gate of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub seed_url: String,
    pub keyword: String,
    pub max_depth: u32,
    pub max_pages: usize,
    pub max_concurrent_fetches: usize,
    pub fetch_timeout: Duration,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            seed_url: config.crawler.seed_url.clone(),
            keyword: config.crawler.keyword.clone(),
            max_depth: config.crawler.max_depth,
            max_pages: config.crawler.max_pages,
            max_concurrent_fetches: config.crawler.max_concurrent_fetches,
            fetch_timeout: Duration::from_millis(config.crawler.fetch_timeout_ms),
        }
    }
}

/// A page waiting to be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: u32,
}

/// What one crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Documents counted against the page budget (stored or not)
    pub documents_retrieved: usize,

    /// Every URL claimed during the run, sorted
    pub visited: Vec<String>,

    /// True if the run stopped because the page budget ran out
    pub budget_exhausted: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// State shared by every task of one crawl
struct CrawlContext {
    settings: CrawlSettings,
    keyword: String,
    link_filter: LinkFilter,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn DocumentStore>,
    visited: VisitedSet,
    budget: PageBudget,
    fetch_permits: Semaphore,
    stop: CancellationToken,
}

/// Main crawler coordinator structure
///
/// One coordinator runs one crawl; its visited set and page budget are not
/// reset between calls to [`Coordinator::run`].
pub struct Coordinator {
    context: Arc<CrawlContext>,
}

impl Coordinator {
    /// Creates a coordinator fetching over HTTP and storing JSON files
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(RippleError)` - Invalid seed URL or HTTP client setup failure
    pub fn new(config: &Config) -> crate::Result<Self> {
        let seed = normalize_url(&config.crawler.seed_url)?;
        let link_filter = LinkFilter::for_seed(&seed, &config.links)?;
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        let store = JsonFileStore::new(&config.store.documents_dir);

        Ok(Self::from_parts(
            CrawlSettings::from_config(config),
            link_filter,
            Arc::new(fetcher),
            Arc::new(store),
        ))
    }

    /// Creates a coordinator from explicit collaborators
    pub fn from_parts(
        settings: CrawlSettings,
        link_filter: LinkFilter,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        let keyword = settings.keyword.to_lowercase();
        let budget = PageBudget::new(settings.max_pages);
        let fetch_permits = Semaphore::new(settings.max_concurrent_fetches.max(1));

        Self {
            context: Arc::new(CrawlContext {
                settings,
                keyword,
                link_filter,
                fetcher,
                store,
                visited: VisitedSet::new(),
                budget,
                fetch_permits,
                stop: CancellationToken::new(),
            }),
        }
    }

    /// Runs the crawl to completion
    ///
    /// Completion means every scheduled task has finished, or the page
    /// budget ran out and every pending task observed the stop signal.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The crawl ran (individual page failures are
    ///   logged, never returned)
    /// * `Err(RippleError)` - The seed URL is not a valid HTTP(S) URL
    pub async fn run(&self) -> crate::Result<CrawlOutcome> {
        let context = &self.context;
        let started_at = Utc::now();
        let start_time = std::time::Instant::now();
        let seed = normalize_url(&context.settings.seed_url)?;

        tracing::info!(
            "Starting crawl from {} (keyword '{}', max depth {}, max pages {})",
            seed,
            context.settings.keyword,
            context.settings.max_depth,
            context.settings.max_pages
        );

        if context.budget.is_exhausted() {
            tracing::info!("Page budget is zero, nothing to crawl");
        } else if context.visited.insert(seed.as_str()) {
            let task = CrawlTask {
                url: seed.to_string(),
                depth: 0,
            };
            Self::crawl_page(Arc::clone(context), task).await;
        }

        let outcome = CrawlOutcome {
            documents_retrieved: context.budget.count(),
            visited: context.visited.snapshot(),
            budget_exhausted: context.stop.is_cancelled(),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl completed: {} documents retrieved, {} URLs visited in {:?}",
            outcome.documents_retrieved,
            outcome.visited.len(),
            start_time.elapsed()
        );

        Ok(outcome)
    }

    /// Processes one claimed URL and, recursively, its children
    ///
    /// Resolves to the number of documents retrieved by this subtree. Never
    /// fails: errors are logged and count as zero documents.
    fn crawl_page(context: Arc<CrawlContext>, task: CrawlTask) -> BoxFuture<'static, usize> {
        async move {
            if task.depth > context.settings.max_depth || context.stop.is_cancelled() {
                return 0;
            }

            match Self::process_page(&context, &task).await {
                Ok(documents) => documents,
                Err(e) => {
                    tracing::warn!("Error processing {}: {}", task.url, e);
                    0
                }
            }
        }
        .boxed()
    }

    async fn process_page(context: &Arc<CrawlContext>, task: &CrawlTask) -> crate::Result<usize> {
        let Some(raw) = Self::fetch_page(context, &task.url).await? else {
            return Ok(0);
        };
        let text = clean_text(&raw);

        // Fetches finishing after the last slot was taken are discarded
        let Some(position) = context.budget.try_acquire() else {
            tracing::debug!("Discarding {}: page budget exhausted", task.url);
            return Ok(0);
        };

        // The last slot stops the crawl before anything else happens
        let budget_reached = position >= context.budget.max();
        if budget_reached {
            context.stop.cancel();
        }

        let document = CrawledDocument::new(task.url.clone(), text);
        if let Err(e) = context.store.save(&document) {
            tracing::warn!("Failed to persist {}: {}", task.url, e);
        }

        tracing::info!(
            "[{}/{}] depth {} {}",
            position,
            context.budget.max(),
            task.depth,
            task.url
        );

        if budget_reached {
            tracing::info!("Page budget of {} reached, stopping crawl", context.budget.max());
            return Ok(1);
        }

        if !document.content.to_lowercase().contains(&context.keyword) {
            tracing::debug!(
                "Keyword '{}' not found on {}, not following links",
                context.settings.keyword,
                task.url
            );
            return Ok(1);
        }

        if task.depth >= context.settings.max_depth {
            return Ok(1);
        }

        let base = Url::parse(&task.url)?;
        let links = extract_links(&raw, &base, &context.link_filter);

        let mut children = Vec::new();
        for link in links {
            if context.stop.is_cancelled() {
                break;
            }
            if !context.visited.insert(&link) {
                continue;
            }

            let child = CrawlTask {
                url: link,
                depth: task.depth + 1,
            };
            children.push(tokio::spawn(Self::crawl_page(Arc::clone(context), child)));
        }

        tracing::debug!("Scheduled {} links from {}", children.len(), task.url);

        let retrieved: usize = join_all(children)
            .await
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|e| {
                    tracing::warn!("Crawl task under {} failed: {}", task.url, e);
                    0
                })
            })
            .sum();

        Ok(1 + retrieved)
    }

    /// Fetches one page under a concurrency permit
    ///
    /// Resolves to `None` if the crawl was stopped before or during the fetch.
    async fn fetch_page(context: &CrawlContext, url: &str) -> Result<Option<String>, FetchError> {
        let permit = tokio::select! {
            _ = context.stop.cancelled() => return Ok(None),
            permit = context.fetch_permits.acquire() => permit,
        };
        let Ok(_permit) = permit else {
            return Ok(None);
        };

        if context.stop.is_cancelled() || context.budget.is_exhausted() {
            return Ok(None);
        }

        tokio::select! {
            _ = context.stop.cancelled() => Ok(None),
            result = tokio::time::timeout(context.settings.fetch_timeout, context.fetcher.fetch(url)) => {
                match result {
                    Ok(body) => body.map(Some),
                    Err(_) => Err(FetchError::Timeout { url: url.to_string() }),
                }
            }
        }
    }

    /// Number of documents counted so far
    pub fn documents_retrieved(&self) -> usize {
        self.context.budget.count()
    }

    /// Returns true if the URL was claimed during the crawl
    pub fn has_visited(&self, url: &str) -> bool {
        self.context.visited.contains(url)
    }
}

/// Runs one crawl from configuration
///
/// # Returns
///
/// * `Ok(usize)` - Number of documents retrieved
/// * `Err(RippleError)` - Invalid seed URL or HTTP client setup failure
///
/// # Example
///
/// ```no_run
/// use ripple_search::config::load_config;
/// use ripple_search::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let documents = crawl(&config).await?;
/// println!("retrieved {} documents", documents);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> crate::Result<usize> {
    let coordinator = Coordinator::new(config)?;
    let outcome = coordinator.run().await?;
    Ok(outcome.documents_retrieved)
}
