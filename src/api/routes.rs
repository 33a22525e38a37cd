//! API Routes
//!
//! Configures the Axum routers for store and router nodes.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::cluster_handlers::{
    cluster_keys_handler, cluster_stat_handler, forward_handler, RouterState,
};
use super::handlers::{
    get_handler, health_handler, keys_handler, lget_handler, mget_handler, remove_handler,
    set_handler, stat_handler, AppState,
};

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the store node router.
///
/// # Endpoints
/// - `GET /get`, `/lget`, `/mget` - Read a value, list element or map member
/// - `POST /set` - Store a value with TTL
/// - `GET /remove` - Delete a key
/// - `GET /keys` - List keys matching `pattern`
/// - `GET /stat` - Hit/miss/sweep counters and entry count
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/get", get(get_handler))
        .route("/lget", get(lget_handler))
        .route("/mget", get(mget_handler))
        .route("/set", post(set_handler).put(set_handler))
        .route("/remove", get(remove_handler).delete(remove_handler))
        .route("/keys", get(keys_handler))
        .route("/stat", get(stat_handler))
        .route("/health", get(health_handler))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the cluster router.
///
/// `/keys` and `/stat` are answered from every store; anything else is
/// forwarded to the store that owns the request's key.
pub fn create_cluster_router(state: RouterState) -> Router {
    Router::new()
        .route("/keys", get(cluster_keys_handler))
        .route("/stat", get(cluster_stat_handler))
        .route("/health", get(health_handler))
        .fallback(forward_handler)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::cluster::Topology;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(CacheStore::new(2)))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/set")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello","ttl":10}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/get?key=nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cluster_unreachable_store_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let state = RouterState::new(Topology::new(vec![address]).unwrap(), 0);
        let response = create_cluster_router(state)
            .oneshot(Request::builder().uri("/get?key=a").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_cluster_health_is_local() {
        let state = RouterState::new(Topology::new(vec!["127.0.0.1:1".to_string()]).unwrap(), 0);
        let response = create_cluster_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
