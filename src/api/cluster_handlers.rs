//! Router Handlers
//!
//! HTTP handlers for the router node: cluster-wide `/keys` and `/stat`, and
//! the fallback that forwards every other request to one store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{RawQuery, Request, State},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::cluster::{forward, Aggregator, StatSnapshot, Topology, TopologyError};
use crate::config::Config;
use crate::error::Result;
use crate::models::{KeysResponse, StatResponse};

/// Router state shared across all router handlers.
#[derive(Clone)]
pub struct RouterState {
    pub client: reqwest::Client,
    pub topology: Topology,
    pub aggregator: Arc<Aggregator>,
    /// Written by the stat crawler, served by `/stat`
    pub snapshot: Arc<StatSnapshot>,
}

impl RouterState {
    pub fn new(topology: Topology, fanout_limit: usize) -> Self {
        let client = reqwest::Client::new();
        let aggregator = Aggregator::new(client.clone(), topology.clone(), fanout_limit);
        Self {
            client,
            topology,
            aggregator: Arc::new(aggregator),
            snapshot: Arc::new(StatSnapshot::new()),
        }
    }

    /// Builds router state from the `[cluster]` section. Fails on an empty
    /// store list.
    pub fn from_config(config: &Config) -> std::result::Result<Self, TopologyError> {
        let topology = Topology::new(config.cluster.store_list.clone())?;
        Ok(Self::new(topology, config.cluster.fanout_limit))
    }
}

/// Handler for GET /keys on the router.
///
/// Concatenates every reachable store's key list for the same query string.
pub async fn cluster_keys_handler(
    State(state): State<RouterState>,
    RawQuery(query): RawQuery,
) -> Json<KeysResponse> {
    let keys = state.aggregator.aggregate_keys(query.as_deref()).await;
    Json(KeysResponse { keys })
}

/// Handler for GET /stat on the router. Serves the crawler's snapshot.
///
/// Each store's `hit` is successful lookups only, not all lookups.
pub async fn cluster_stat_handler(
    State(state): State<RouterState>,
) -> Json<StatResponse<HashMap<String, Value>>> {
    Json(StatResponse {
        stat: state.snapshot.current().await,
    })
}

/// Fallback handler: relay the request to the store owning its key.
pub async fn forward_handler(
    State(state): State<RouterState>,
    request: Request,
) -> Result<Response> {
    forward(&state.client, &state.topology, request).await
}
