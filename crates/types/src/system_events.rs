//! System-contract event records: mint/burn, minter configuration,
//! validator-set changes, gas-tip updates, blacklist membership, member
//! changes, and emergency pauses. All share the same shape (contract +
//! block + tx provenance plus event-specific fields) so callers can treat
//! them uniformly in the write path's fan-out pattern.

use crate::primitives::{Address, Hash32};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MintEvent {
    pub contract: Address,
    pub minter: Address,
    pub to: Address,
    pub amount: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub log_index: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BurnEvent {
    pub contract: Address,
    pub burner: Address,
    pub from: Address,
    pub amount: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub log_index: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MinterConfigEvent {
    pub contract: Address,
    pub minter: Address,
    pub allowance: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidatorChangeEvent {
    pub contract: Address,
    pub validator: Address,
    pub added: bool,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GasTipEvent {
    pub contract: Address,
    pub new_tip: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlacklistEvent {
    pub contract: Address,
    pub address: Address,
    pub blacklisted: bool,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MemberChangeEvent {
    pub contract: Address,
    pub member: Address,
    pub added: bool,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EmergencyPauseEvent {
    pub contract: Address,
    pub paused: bool,
    pub tx_hash: Hash32,
    pub block_number: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DepositMintProposal {
    pub contract: Address,
    pub id: u64,
    pub depositor: Address,
    pub amount: U256,
    pub approvals: u32,
    pub executed: bool,
    pub created_at_block: u64,
}
