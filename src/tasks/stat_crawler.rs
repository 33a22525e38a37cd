//! Stat Crawler Task
//!
//! Fills the router's stat snapshot from every store after a startup delay,
//! then optionally keeps refreshing it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cluster::{Aggregator, StatSnapshot};

/// Spawns the crawler.
///
/// The first crawl runs after `delay`. With `refresh` set, the crawler then
/// repeats every `refresh`; without it the task ends after one crawl.
pub fn spawn_stat_crawler(
    aggregator: Arc<Aggregator>,
    snapshot: Arc<StatSnapshot>,
    delay: Duration,
    refresh: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        loop {
            let stats = aggregator.collect_stats().await;
            info!("Stat crawl collected {} stores", stats.len());
            snapshot.update(stats).await;

            match refresh {
                Some(interval) => tokio::time::sleep(interval).await,
                None => break,
            }
        }
    })
}
