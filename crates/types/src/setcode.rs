use crate::primitives::{Address, Hash32};
use serde::{Deserialize, Serialize};

/// EIP-7702-style delegation record attached to a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetCodeAuthorization {
    pub tx_hash: Hash32,
    pub auth_index: u32,
    pub block_number: u64,
    pub tx_index: u32,
    pub target: Address,
    pub authority: Address,
    pub applied: bool,
}

/// Aggregate counters kept per authority address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressSetCodeStats {
    pub authorizations_granted: u64,
    pub authorizations_applied: u64,
}

/// Current delegation state for a single address. Transitions are supplied
/// wholesale by the writer (§4.4.4); the storage layer does not validate
/// them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressDelegationState {
    pub has_delegation: bool,
    pub target: Option<Address>,
    pub block_number: u64,
    pub updated_at: u64,
}
