//! Cache Statistics Module
//!
//! Hit, miss and sweep counters for a store, plus the serializable snapshot
//! returned by `/stat`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// == Counters ==
/// Monotonic counters updated concurrently by readers and the sweep task.
#[derive(Debug, Default)]
pub struct StatCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    gc_calls: AtomicU64,
}

impl StatCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_gc_call(&self) {
        self.gc_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a snapshot with the given entry count.
    pub fn snapshot(&self, len: usize) -> CacheStats {
        CacheStats {
            hit: self.hits.load(Ordering::Relaxed),
            missed: self.misses.load(Ordering::Relaxed),
            gc_call: self.gc_calls.load(Ordering::Relaxed),
            len,
        }
    }
}

// == Cache Stats ==
/// Point-in-time store statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups that found their key
    pub hit: u64,
    /// Lookups that did not
    pub missed: u64,
    /// Completed sweep passes
    pub gc_call: u64,
    /// Entries currently held
    pub len: usize,
}
