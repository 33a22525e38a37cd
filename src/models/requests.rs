//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /set`. Echoed back verbatim in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store (any JSON value)
    #[serde(default)]
    pub value: Value,
    /// TTL in seconds; zero or negative entries expire on the next sweep
    #[serde(default)]
    pub ttl: i64,
}

/// Query string of `/get`, `/lget`, `/mget` and `/remove`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
    /// List index (`/lget`) or map member (`/mget`)
    pub innerkey: Option<String>,
}

impl KeyQuery {
    /// The key, if present and non-empty.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Query string of `/keys`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    #[serde(default)]
    pub pattern: String,
}

/// Only the key of a write body; every other field is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct KeyProbe {
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!("hello"));
        assert_eq!(req.ttl, 0);
    }

    #[test]
    fn test_set_request_structured_value() {
        let json = r#"{"key": "k", "value": {"a": [1, 2]}, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"a": [1, 2]}));
        assert_eq!(req.ttl, 60);
    }

    #[test]
    fn test_set_request_requires_key() {
        let result: Result<SetRequest, _> = serde_json::from_str(r#"{"value": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_key_query_empty_key_is_none() {
        let query = KeyQuery {
            key: Some(String::new()),
            innerkey: None,
        };
        assert!(query.key().is_none());
    }

    #[test]
    fn test_key_probe_ignores_other_fields() {
        let probe: KeyProbe = serde_json::from_str(r#"{"key":"k","value":[1],"ttl":5}"#).unwrap();
        assert_eq!(probe.key.as_deref(), Some("k"));

        let probe: KeyProbe = serde_json::from_str(r#"{"value":1}"#).unwrap();
        assert!(probe.key.is_none());
    }
}
