//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::SetRequest;

/// Response body for `/get`, `/lget` and `/mget`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: Value,
}

impl ItemResponse {
    pub fn new(item: Value) -> Self {
        Self { item }
    }
}

/// Response body for `/set`: the request, echoed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetResponse {
    pub item: SetRequest,
}

/// Response body for `/remove`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveResponse {
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

/// Response body for `/keys` on both node kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for `/stat`.
///
/// A store answers with its `CacheStats`; the router answers with a map of
/// store address to stats object or error string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatResponse<T> {
    pub stat: T,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use serde_json::json;

    #[test]
    fn test_item_response_serialize() {
        let json = serde_json::to_value(ItemResponse::new(json!([1, "a"]))).unwrap();
        assert_eq!(json, json!({"item": [1, "a"]}));
    }

    #[test]
    fn test_set_response_echoes_request() {
        let resp = SetResponse {
            item: SetRequest {
                key: "k".to_string(),
                value: json!({"x": 1}),
                ttl: 30,
            },
        };
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json, json!({"item": {"key": "k", "value": {"x": 1}, "ttl": 30}}));
    }

    #[test]
    fn test_remove_response_field_name() {
        let json = serde_json::to_value(RemoveResponse { is_deleted: true }).unwrap();
        assert_eq!(json, json!({"isDeleted": true}));
    }

    #[test]
    fn test_store_stat_response_shape() {
        let resp = StatResponse {
            stat: CacheStats {
                hit: 1,
                missed: 0,
                gc_call: 2,
                len: 3,
            },
        };
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json, json!({"stat": {"hit": 1, "missed": 0, "gcCall": 2, "len": 3}}));
    }

    #[test]
    fn test_keys_response_roundtrip_from_wire() {
        let resp: KeysResponse = serde_json::from_str(r#"{"keys":["a","b"]}"#).unwrap();
        assert_eq!(resp.keys, vec!["a", "b"]);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert_eq!(json, r#"{"error":"Something went wrong"}"#);
    }
}
