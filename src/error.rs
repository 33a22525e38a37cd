//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for store and router nodes.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key listing requested on a store with no entries
    #[error("Store empty")]
    EmptyStore,

    /// Malformed client input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key filter pattern failed to compile
    #[error("Bad pattern: {0}")]
    BadPattern(String),

    /// Store refused a write
    #[error("Rejected: {0}")]
    Rejected(String),

    /// A store could not be reached by the router
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl CacheError {
    pub fn status(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) | CacheError::EmptyStore => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::BadPattern(_) => StatusCode::BAD_REQUEST,
            CacheError::Rejected(_) => StatusCode::FORBIDDEN,
            CacheError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));

        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (CacheError::NotFound("k".to_string()), StatusCode::NOT_FOUND),
            (CacheError::EmptyStore, StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (CacheError::BadPattern("(".to_string()), StatusCode::BAD_REQUEST),
            (CacheError::Rejected("no".to_string()), StatusCode::FORBIDDEN),
            (CacheError::Upstream("down".to_string()), StatusCode::BAD_GATEWAY),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = CacheError::NotFound("missing".to_string()).into_response();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.contains("application/json"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Key not found: missing");
    }
}
