//! Cache Module
//!
//! The store node's in-memory TTL map, its statistics, and the key filter.

mod entry;
mod filter;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp, CacheEntry};
pub use filter::{filter_keys, KeyFilter};
pub use stats::{CacheStats, StatCounters};
pub use store::CacheStore;
