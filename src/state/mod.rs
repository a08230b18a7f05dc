//! Shared crawl state
//!
//! Every concurrent branch of one crawl sees the same two pieces of state:
//!
//! - `VisitedSet`: URLs already processed or in flight
//! - `PageBudget`: how many documents the crawl has retrieved so far
//!
//! Both are only changed through atomic operations (a locked
//! check-and-insert, and an increment-with-limit), so they stay
//! linearizable when the fan-out runs on multiple worker threads.

mod budget;
mod visited;

pub use budget::PageBudget;
pub use visited::VisitedSet;
