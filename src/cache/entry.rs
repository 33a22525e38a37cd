//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use serde_json::Value;

// == Cache Entry ==
/// A stored value and the absolute second at which it becomes sweepable.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (any JSON value)
    pub value: Value,
    /// Expiration timestamp (Unix seconds), fixed at write time
    pub expires_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` after `now`.
    ///
    /// Zero and negative TTLs are accepted; such entries are already eligible
    /// for the next sweep.
    pub fn new(value: Value, ttl_seconds: i64, now: i64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl_seconds),
        }
    }

    // == Is Expired ==
    /// True once `now` is strictly past the expiry second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
