//! Ripple-Search main entry point
//!
//! This is the command-line interface for the Ripple-Search crawler and
//! search engine.

use anyhow::Context;
use clap::Parser;
use ripple_search::config::{load_config_with_hash, Config};
use ripple_search::crawler::Coordinator;
use ripple_search::index::IndexEngine;
use ripple_search::output::{
    load_statistics, print_crawl_outcome, print_search_results, print_statistics,
};
use ripple_search::search::SearchService;
use ripple_search::storage::JsonFileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Search: a bounded crawler with a term index
///
/// Ripple-Search crawls outward from a seed page, following links only from
/// pages that mention a keyword, stores the text of every page it reads and
/// answers ranked free-text queries over the stored corpus.
#[derive(Parser, Debug)]
#[command(name = "ripple-search")]
#[command(version)]
#[command(about = "A bounded crawler with a term index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "skip_crawl", "query"])]
    dry_run: bool,

    /// Show statistics of the stored corpus and exit
    #[arg(long, conflicts_with_all = ["dry_run", "query"])]
    stats: bool,

    /// Search the documents already stored instead of crawling first
    #[arg(long)]
    skip_crawl: bool,

    /// Query to run against the index
    #[arg(long, value_name = "QUERY")]
    query: Option<String>,

    /// Maximum number of results (defaults to index.max-results)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if cli.stats {
        let service = load_index(&config)?;
        print_statistics(&load_statistics(service.engine()));
        return Ok(());
    }

    if !cli.skip_crawl {
        handle_crawl(&config).await?;
    }

    let service = load_index(&config)?;
    match cli.query {
        Some(query) => {
            let limit = cli.limit.unwrap_or(config.index.max_results);
            let hits = service.query(&query, limit);
            print_search_results(&query, &hits);
        }
        None => print_statistics(&load_statistics(service.engine())),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_search=info,warn"),
            1 => EnvFilter::new("ripple_search=debug,info"),
            2 => EnvFilter::new("ripple_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Search Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Keyword: {}", config.crawler.keyword);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Fetch timeout: {}ms", config.crawler.fetch_timeout_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nLinks:");
    println!(
        "  Site: {}",
        config.links.site.as_deref().unwrap_or("(seed host)")
    );
    println!("  Path prefix: {}", config.links.path_prefix);
    println!("  Excluded path chars: {:?}", config.links.excluded_path_chars);

    println!("\nStore:");
    println!("  Documents: {}", config.store.documents_dir);

    println!("\nIndex:");
    println!("  k1: {}", config.index.k1);
    println!("  b: {}", config.index.b);
    println!("  Max results: {}", config.index.max_results);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config).context("Failed to set up crawler")?;

    let outcome = match coordinator.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_crawl_outcome(&outcome);
    Ok(())
}

/// Bulk-loads the document store into a fresh index
fn load_index(config: &Config) -> anyhow::Result<SearchService> {
    let store = JsonFileStore::new(&config.store.documents_dir);
    let engine = IndexEngine::with_bm25(config.index.k1, config.index.b);

    SearchService::from_store(&store, engine).with_context(|| {
        format!(
            "Failed to load documents from {}",
            config.store.documents_dir
        )
    })
}
