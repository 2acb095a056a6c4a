use crate::primitives::{Address, Hash32};
use serde::{Deserialize, Serialize};

/// Side-table metadata for a fee-delegated transaction (§9): the reference
/// EVM library cannot parse type `0x16`, so the engine stores it out of
/// band, keyed by `tx_hash`, plus a per-fee-payer index. `fee_payer` arrives
/// already resolved by the caller (§9 Open Question) — `None` when the
/// transaction carries no sponsor, in which case no payer-index entry is
/// written.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FeeDelegationTxMeta {
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub original_type: u8,
    pub fee_payer: Option<Address>,
    pub v: u64,
    pub r: Hash32,
    pub s: Hash32,
}
