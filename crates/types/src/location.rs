use crate::primitives::Hash32;
use serde::{Deserialize, Serialize};

/// Positions a transaction within the chain: the inverse mapping from
/// transaction hash to `(block_height, tx_index, block_hash)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxLocation {
    pub block_height: u64,
    pub tx_index: u32,
    pub block_hash: Hash32,
}
