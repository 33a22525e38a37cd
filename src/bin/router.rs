//! ShardKV router node
//!
//! Shards single-key requests across the configured stores and answers
//! cluster-wide `/keys` and `/stat`.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration (`shardkv-router.toml` or `$SHARDKV_CONFIG`, then env)
//! 3. Build the topology from `cluster.store_list` (fatal if empty)
//! 4. Start the stat crawler
//! 5. Serve HTTP until SIGINT/SIGTERM

use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use shardkv::api::create_cluster_router;
use shardkv::{init_tracing, shutdown_signal, spawn_stat_crawler, Config, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting ShardKV router");

    let config = Config::load("shardkv-router").context("loading configuration")?;
    let state = RouterState::from_config(&config).context("building store topology")?;
    info!(
        "Routing across {} stores: {:?}",
        state.topology.len(),
        state.topology.stores()
    );

    let refresh = match config.cluster.stat_refresh_interval {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let crawler_handle = spawn_stat_crawler(
        state.aggregator.clone(),
        state.snapshot.clone(),
        Duration::from_secs(config.cluster.stat_crawler_timeout),
        refresh,
    );

    let app = create_cluster_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Router listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    crawler_handle.abort();
    info!("Router shutdown complete");
    Ok(())
}
