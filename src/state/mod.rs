//! State module for the persisted crawl ledger
//!
//! This module provides the in-memory forms of the two persisted stores.
//!
//! # Components
//!
//! - `VisitedSet`: visited keys of every page whose links were extracted
//! - `StatsStore`: cumulative word frequencies, subdomain page counts and the longest page
//! - `WordFrequency`: insertion-ordered token counts with merge support

mod stats_store;
mod visited;

// Re-export main types
pub use stats_store::{LongestPage, StatsStore, WordFrequency};
pub use visited::VisitedSet;
