//! Cache Store Module
//!
//! The single-node TTL map. One reader/writer lock guards the whole map; the
//! counters sit beside it as atomics so lookups can count under a shared lock.
//!
//! Expiry is lazy: reads never look at `expires_at`. Entries disappear only
//! when the sweep (`sweep`) runs, so an expired entry stays readable until then.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::entry::current_timestamp;
use crate::cache::{filter_keys, CacheEntry, CacheStats, StatCounters};
use crate::error::{CacheError, Result};

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Hit/miss/sweep counters
    counters: StatCounters,
    /// Worker tasks per `keys` call
    filter_workers: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose key filter runs on `filter_workers` tasks.
    pub fn new(filter_workers: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            counters: StatCounters::new(),
            filter_workers,
        }
    }

    // == Get ==
    /// Returns the stored value, expired or not.
    ///
    /// A found key counts one hit, an absent key one miss, so `hit + missed`
    /// is the number of lookups.
    pub async fn get(&self, key: &str) -> Result<Value> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                self.counters.record_hit();
                Ok(entry.value.clone())
            }
            None => {
                self.counters.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// The entry expires `ttl` seconds from now. Returns the stored value.
    pub async fn set(&self, key: String, value: Value, ttl: i64) -> Value {
        self.set_at(key, value, ttl, current_timestamp()).await
    }

    /// `set` with an explicit write time.
    pub async fn set_at(&self, key: String, value: Value, ttl: i64, now: i64) -> Value {
        let entry = CacheEntry::new(value.clone(), ttl, now);
        self.entries.write().await.insert(key, entry);
        value
    }

    // == Remove ==
    /// Deletes `key`. Fails with `NotFound` if it is absent.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let found = self.entries.read().await.contains_key(key);
        if !found {
            self.counters.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        }
        self.counters.record_hit();

        self.entries.write().await.remove(key);
        Ok(true)
    }

    // == Keys ==
    /// Lists keys whose whole string matches `pattern`, or all keys if the
    /// pattern is empty.
    ///
    /// Fails with `EmptyStore` when the store holds nothing and with
    /// `BadPattern` when the pattern does not compile.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let keys: Vec<String> = {
            let entries = self.entries.read().await;
            if entries.is_empty() {
                return Err(CacheError::EmptyStore);
            }
            entries.keys().cloned().collect()
        };

        filter_keys(keys, pattern, self.filter_workers).await
    }

    // == Stat ==
    pub async fn stat(&self) -> CacheStats {
        let len = self.entries.read().await.len();
        self.counters.snapshot(len)
    }

    // == Sweep ==
    /// Removes every entry whose expiry is strictly in the past.
    ///
    /// Holds the write lock for the whole scan. Returns the number removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(current_timestamp()).await
    }

    /// `sweep` against an explicit clock reading.
    pub async fn sweep_at(&self, now: i64) -> usize {
        let mut entries = self.entries.write().await;
        self.counters.record_gc_call();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(4)
    }
}
