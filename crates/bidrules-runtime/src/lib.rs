//! BidRules Runtime - execution engine for compiled decision trees
//!
//! This crate walks compiled trees against auction requests and keeps the
//! per-account cache of compiled configurations the request path reads from.

pub mod cache;
pub mod error;
pub mod executor;

// Re-export main types
pub use cache::{config_hash, rebuild_trees, CacheEntry, TreeCache, DEFAULT_REFRESH_TTL};
pub use error::{Result, RuntimeError};
pub use executor::TreeExecutor;
