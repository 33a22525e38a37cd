//! Cluster Module
//!
//! Router-side logic: shard assignment over a fixed store list, request
//! forwarding, fan-out/gather across every store, and the stat snapshot.

mod aggregate;
mod proxy;
mod shard;
mod snapshot;

pub use aggregate::Aggregator;
pub use proxy::{extract_key, forward, MAX_FORWARD_BODY};
pub use shard::{fnv1a_32, Topology, TopologyError};
pub use snapshot::StatSnapshot;
