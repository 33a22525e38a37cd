//! API Handlers
//!
//! HTTP request handlers for each store node endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, ItemResponse, KeyQuery, KeysQuery, KeysResponse, RemoveResponse, SetRequest,
    SetResponse, StatResponse,
};

/// Application state shared across all store handlers.
///
/// The store does its own locking, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(config.options.filter_keys_workers))
    }
}

fn require_key(query: &KeyQuery) -> Result<&str> {
    query
        .key()
        .ok_or_else(|| CacheError::InvalidRequest("missing query parameter 'key'".to_string()))
}

/// Handler for GET /get?key=
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ItemResponse>> {
    let key = require_key(&query)?;
    let item = state.store.get(key).await?;

    Ok(Json(ItemResponse::new(item)))
}

/// Handler for GET /lget?key=&innerkey=
///
/// Returns one element of a stored list; `innerkey` is the index.
pub async fn lget_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ItemResponse>> {
    let key = require_key(&query)?;
    let item = state.store.get(key).await?;

    let index: usize = query
        .innerkey
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| CacheError::InvalidRequest("bad innerkey for list".to_string()))?;
    let list = item
        .as_array()
        .ok_or_else(|| CacheError::InvalidRequest("value not list".to_string()))?;
    let element = list
        .get(index)
        .cloned()
        .ok_or_else(|| CacheError::InvalidRequest("list key out of range".to_string()))?;

    Ok(Json(ItemResponse::new(element)))
}

/// Handler for GET /mget?key=&innerkey=
///
/// Returns one member of a stored map, or `null` if the member is absent.
pub async fn mget_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ItemResponse>> {
    let key = require_key(&query)?;
    let item = state.store.get(key).await?;

    let map = item
        .as_object()
        .ok_or_else(|| CacheError::InvalidRequest("value not dictionary".to_string()))?;
    let member = query.innerkey.as_deref().unwrap_or_default();
    let element = map.get(member).cloned().unwrap_or(Value::Null);

    Ok(Json(ItemResponse::new(element)))
}

/// Handler for POST /set
///
/// Stores `value` under `key` for `ttl` seconds and echoes the request.
pub async fn set_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<SetResponse>> {
    let req: SetRequest =
        serde_json::from_slice(&body).map_err(|e| CacheError::InvalidRequest(e.to_string()))?;

    if req.key.is_empty() {
        return Err(CacheError::Rejected("key cannot be empty".to_string()));
    }

    let SetRequest { key, value, ttl } = req;
    let value = state.store.set(key.clone(), value, ttl).await;

    Ok(Json(SetResponse {
        item: SetRequest { key, value, ttl },
    }))
}

/// Handler for GET /remove?key=
pub async fn remove_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<RemoveResponse>> {
    let key = require_key(&query)?;
    let is_deleted = state.store.remove(key).await?;

    Ok(Json(RemoveResponse { is_deleted }))
}

/// Handler for GET /keys?pattern=
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<KeysResponse>> {
    let keys = state.store.keys(&query.pattern).await?;

    Ok(Json(KeysResponse { keys }))
}

/// Handler for GET /stat
pub async fn stat_handler(State(state): State<AppState>) -> Json<StatResponse<CacheStats>> {
    Json(StatResponse {
        stat: state.store.stat().await,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
