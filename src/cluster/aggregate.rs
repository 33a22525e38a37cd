//! Cluster Fan-out
//!
//! Sends the same request to every store concurrently and merges the
//! replies. A store that errors contributes nothing to the result; the
//! failure is logged and never aborts the call.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::cluster::Topology;
use crate::error::{CacheError, Result};
use crate::models::{KeysResponse, StatResponse};

// == Aggregator ==
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: reqwest::Client,
    topology: Topology,
    /// Max probes in flight within one fan-out call; 0 is uncapped
    fanout_limit: usize,
}

impl Aggregator {
    /// Creates an aggregator. `fanout_limit == 0` runs one task per store
    /// with no cap.
    pub fn new(client: reqwest::Client, topology: Topology, fanout_limit: usize) -> Self {
        Self {
            client,
            topology,
            fanout_limit,
        }
    }

    /// Runs `probe` against every store and returns `(address, result)`
    /// pairs in completion order. Waits for every probe.
    ///
    /// Each call gets its own permit pool, so concurrent calls do not
    /// throttle one another.
    async fn fan_out<T, F, Fut>(&self, probe: F) -> Vec<(String, T)>
    where
        F: Fn(reqwest::Client, String) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let limit = (self.fanout_limit > 0).then(|| Arc::new(Semaphore::new(self.fanout_limit)));
        let mut probes = JoinSet::new();
        for address in self.topology.stores() {
            let call = probe(self.client.clone(), address.clone());
            let limit = limit.clone();
            let address = address.clone();
            probes.spawn(async move {
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                (address, call.await)
            });
        }

        let mut results = Vec::with_capacity(self.topology.len());
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok(pair) => results.push(pair),
                Err(e) => error!("Fan-out probe task failed: {}", e),
            }
        }
        results
    }

    // == Keys ==
    /// Lists keys on every store with the same query string and concatenates
    /// the lists. Duplicates are kept.
    pub async fn aggregate_keys(&self, raw_query: Option<&str>) -> Vec<String> {
        let query = raw_query.map(str::to_string);
        let replies = self
            .fan_out(move |client, address| fetch_keys(client, address, query.clone()))
            .await;

        let mut keys = Vec::new();
        for (address, reply) in replies {
            match reply {
                Ok(store_keys) => {
                    debug!("Store {} returned {} keys", address, store_keys.len());
                    keys.extend(store_keys);
                }
                Err(e) => warn!("Store {} key request failed: {}", address, e),
            }
        }
        keys
    }

    // == Stats ==
    /// Fetches `/stat` from every store. Each address maps to the decoded
    /// stats object, or to the error text if the probe failed.
    pub async fn collect_stats(&self) -> HashMap<String, Value> {
        let replies = self.fan_out(fetch_stat).await;

        replies
            .into_iter()
            .map(|(address, reply)| {
                let stat = reply.unwrap_or_else(|e| {
                    warn!("Store {} stat request failed: {}", address, e);
                    Value::String(e.to_string())
                });
                (address, stat)
            })
            .collect()
    }
}

async fn fetch_keys(
    client: reqwest::Client,
    address: String,
    query: Option<String>,
) -> Result<Vec<String>> {
    let mut url = format!("http://{}/keys", address);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query);
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CacheError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CacheError::Upstream(format!("status {}", status)));
    }

    let body: KeysResponse = response
        .json()
        .await
        .map_err(|e| CacheError::Upstream(e.to_string()))?;
    Ok(body.keys)
}

async fn fetch_stat(client: reqwest::Client, address: String) -> Result<Value> {
    let body: StatResponse<Value> = client
        .get(format!("http://{}/stat", address))
        .send()
        .await
        .map_err(|e| CacheError::Upstream(e.to_string()))?
        .json()
        .await
        .map_err(|e| CacheError::Upstream(e.to_string()))?;
    Ok(body.stat)
}
