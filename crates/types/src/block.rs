use crate::primitives::{Address, Hash32};
use serde::{Deserialize, Serialize};

/// A canonical block as ingested from the upstream node. Ordered by
/// monotonically increasing `number`; identified by either `number` or
/// `hash`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub hash: Hash32,
    pub parent_hash: Hash32,
    pub timestamp: u64,
    pub miner: Address,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// Transaction hashes in block order. Full transaction bodies are
    /// stored independently under `tx_key(number, index)`.
    pub transactions: Vec<Hash32>,
}

impl Block {
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}
