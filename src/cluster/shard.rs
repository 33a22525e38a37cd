//! Shard Assignment
//!
//! Maps a key to one store of a fixed, ordered topology by FNV-1a hashing
//! the key bytes modulo the store count. The mapping is stable across
//! processes for the same key bytes and topology length. There is no
//! rebalancing: changing the store count remaps nearly every key.

use std::sync::Arc;

use thiserror::Error;

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash.
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV32_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV32_PRIME);
        i += 1;
    }
    hash
}

/// Why a store list cannot form a topology.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TopologyError {
    #[error("store list must not be empty")]
    NoStores,
}

// == Topology ==
/// Immutable ordered list of store addresses.
#[derive(Debug, Clone)]
pub struct Topology {
    stores: Arc<[String]>,
}

impl Topology {
    /// Builds a topology. Fails if `stores` is empty.
    pub fn new(stores: Vec<String>) -> Result<Self, TopologyError> {
        if stores.is_empty() {
            return Err(TopologyError::NoStores);
        }
        Ok(Self {
            stores: stores.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Always false; an empty topology cannot be built.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn stores(&self) -> &[String] {
        &self.stores
    }

    /// Shard index for `key`: `fnv1a_32(key) mod len`.
    pub fn shard_index(&self, key: &str) -> usize {
        (fnv1a_32(key.as_bytes()) % self.stores.len() as u32) as usize
    }

    /// Address of the store at `index`.
    pub fn address(&self, index: usize) -> &str {
        &self.stores[index % self.stores.len()]
    }

    /// Address of the store owning `key`; shard 0 when there is no key.
    pub fn store_for(&self, key: Option<&str>) -> (usize, &str) {
        let index = key.map(|k| self.shard_index(k)).unwrap_or(0);
        (index, self.address(index))
    }
}
