//! Output module for console reports
//!
//! This module handles:
//! - Summaries of finished crawl runs
//! - Index statistics
//! - Ranked search hits

pub mod stats;

pub use stats::{load_statistics, print_statistics, IndexStatistics};

use crate::crawler::CrawlOutcome;
use crate::search::SearchHit;

/// Prints a crawl run summary to stdout
pub fn print_crawl_outcome(outcome: &CrawlOutcome) {
    let duration = outcome.finished_at - outcome.started_at;

    println!("=== Crawl Summary ===\n");
    println!("  Started: {}", outcome.started_at.to_rfc3339());
    println!("  Finished: {}", outcome.finished_at.to_rfc3339());
    println!("  Duration: {:.1}s", duration.num_milliseconds() as f64 / 1000.0);
    println!("  Documents retrieved: {}", outcome.documents_retrieved);
    println!("  URLs visited: {}", outcome.visited.len());
    if outcome.budget_exhausted {
        println!("  Stopped early: page budget reached");
    }
    println!();
}

/// Formats search hits as numbered console entries
pub fn format_search_results(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results for \"{}\"\n", query);
    }

    let mut out = format!("=== {} results for \"{}\" ===\n\n", hits.len(), query);
    for (rank, hit) in hits.iter().enumerate() {
        out.push_str(&format!("{}. {} (score {:.3})\n", rank + 1, hit.title, hit.score));
        out.push_str(&format!("   {}\n", hit.url));
        out.push_str(&format!("   {}\n\n", hit.snippet));
    }
    out
}

/// Prints search hits to stdout
pub fn print_search_results(query: &str, hits: &[SearchHit]) {
    print!("{}", format_search_results(query, hits));
}
