//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: removes expired store entries at a fixed interval
//! - Stat Crawler: fills the router's per-store stat snapshot

mod cleanup;
mod stat_crawler;

pub use cleanup::spawn_cleanup_task;
pub use stat_crawler::spawn_stat_crawler;
