use crate::primitives::{Address, Hash32, SignedU256};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// An append-only balance observation. Snapshots are keyed by sequence, not
/// block number; §9 requires writers to append them in block order for
/// `GetAddressBalance`'s scan to be correct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub address: Address,
    pub block_number: u64,
    pub balance: U256,
    pub delta: SignedU256,
    pub tx_hash: Hash32,
}
