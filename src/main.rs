//! ShardKV store node
//!
//! Serves one shard's TTL map over HTTP.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration (`shardkv.toml` or `$SHARDKV_CONFIG`, then env)
//! 3. Create the store
//! 4. Start the background TTL sweep unless disabled
//! 5. Serve HTTP until SIGINT/SIGTERM

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use shardkv::api::create_router;
use shardkv::{init_tracing, shutdown_signal, spawn_cleanup_task, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting ShardKV store node");

    let config = Config::load("shardkv").context("loading configuration")?;
    info!(
        "Configuration loaded: bind={}, gc_interval={}s, gc_disabled={}, filter_workers={}",
        config.bind_addr(),
        config.gc_interval().as_secs(),
        config.options.disabled_gc,
        config.options.filter_keys_workers
    );

    if config.options.timeout_gc == 0 && !config.options.disabled_gc {
        warn!("timeout_gc = 0 is below the minimum; sweeping every second");
    }

    let state = AppState::from_config(&config);

    let sweep_handle = if config.options.disabled_gc {
        warn!("TTL sweep disabled; expired entries will never be removed");
        None
    } else {
        Some(spawn_cleanup_task(state.store.clone(), config.gc_interval()))
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Store listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    if let Some(handle) = sweep_handle {
        handle.abort();
    }
    info!("Server shutdown complete");
    Ok(())
}
