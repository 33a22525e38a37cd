//! API Module
//!
//! HTTP handlers and routing for both node kinds.
//!
//! # Store endpoints
//! - `GET /get`, `/lget`, `/mget` - Read by `key` (and `innerkey`)
//! - `POST /set` - Store `{key, value, ttl}`
//! - `GET /remove` - Delete by `key`
//! - `GET /keys` - List keys matching `pattern`
//! - `GET /stat` - Store statistics
//!
//! # Router endpoints
//! - `GET /keys` - Keys from every store, concatenated
//! - `GET /stat` - Per-store stat snapshot
//!
//! In every stats object `hit` counts only lookups that found their key;
//! total lookups are `hit + missed`.
//! - anything else - Forwarded to the store owning the key

pub mod cluster_handlers;
pub mod handlers;
pub mod routes;

pub use cluster_handlers::RouterState;
pub use handlers::AppState;
pub use routes::{create_cluster_router, create_router};
