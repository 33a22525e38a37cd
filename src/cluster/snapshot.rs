//! Stat Snapshot
//!
//! The router's last-observed statistics for each store. Written by the stat
//! crawler, read by any number of `/stat` requests.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

/// Store address -> stats object or error string.
#[derive(Debug, Default)]
pub struct StatSnapshot {
    stats: RwLock<HashMap<String, Value>>,
}

impl StatSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a crawl result in, replacing entries for the same addresses.
    pub async fn update(&self, stats: HashMap<String, Value>) {
        self.stats.write().await.extend(stats);
    }

    /// Copy of the current map. Empty until the first crawl completes.
    pub async fn current(&self) -> HashMap<String, Value> {
        self.stats.read().await.clone()
    }
}
