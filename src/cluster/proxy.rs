//! Request Forwarding
//!
//! Picks the shard for a single-key request and relays it to that store
//! untouched: same method, path, query, headers and body. The store's
//! response comes back as-is.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Query, Request},
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};
use tracing::debug;

use crate::cluster::Topology;
use crate::error::{CacheError, Result};
use crate::models::{KeyProbe, KeyQuery};

/// Largest request body the router will buffer for key extraction.
pub const MAX_FORWARD_BODY: usize = 8 * 1024 * 1024;

/// Connection-scoped headers that must not be relayed between hops.
const HOP_HEADERS: [header::HeaderName; 5] = [
    header::CONNECTION,
    header::HOST,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::UPGRADE,
];

/// Finds the routing key of a request.
///
/// Read-style requests use the `key` query parameter. Write-style requests
/// (`POST`, `PUT`, `PATCH`) prefer a `key` field in the JSON body and fall
/// back to the query parameter. `None` if neither yields a non-empty key.
pub fn extract_key(method: &Method, uri: &Uri, body: &[u8]) -> Option<String> {
    let from_query = Query::<KeyQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(q)| q.key().map(str::to_string));

    let is_write = matches!(*method, Method::POST | Method::PUT | Method::PATCH);
    if !is_write {
        return from_query;
    }

    serde_json::from_slice::<KeyProbe>(body)
        .ok()
        .and_then(|probe| probe.key)
        .filter(|k| !k.is_empty())
        .or(from_query)
}

fn strip_hop_headers(headers: &mut HeaderMap) {
    for name in HOP_HEADERS.iter() {
        headers.remove(name);
    }
}

/// Forwards `request` to the store owning its key and relays the reply.
pub async fn forward(
    client: &reqwest::Client,
    topology: &Topology,
    request: Request,
) -> Result<Response> {
    let (parts, body) = request.into_parts();

    // Buffer so the key can be read and the store still gets the full body
    let body: Bytes = to_bytes(body, MAX_FORWARD_BODY)
        .await
        .map_err(|e| CacheError::InvalidRequest(e.to_string()))?;

    let key = extract_key(&parts.method, &parts.uri, &body);
    let (index, address) = topology.store_for(key.as_deref());
    debug!(
        "Forwarding {} {} (key={:?}) to shard {} at {}",
        parts.method,
        parts.uri.path(),
        key,
        index,
        address
    );

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("http://{}{}", address, path_and_query);

    let mut headers = parts.headers;
    strip_hop_headers(&mut headers);

    let upstream = client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| CacheError::Upstream(format!("store {}: {}", address, e)))?;

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_headers(&mut headers);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| CacheError::Upstream(format!("store {}: {}", address, e)))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
