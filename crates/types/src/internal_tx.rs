use crate::primitives::{Address, Hash32};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CallType {
    Call,
    StaticCall,
    DelegateCall,
    Create,
    Create2,
    SelfDestruct,
}

/// A single call-trace frame belonging to a transaction, ordered by `index`
/// within it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InternalTransaction {
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub index: u32,
    pub call_type: CallType,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_used: u64,
    pub input: Vec<u8>,
    pub output: Vec<u8>,
    pub error: Option<String>,
    pub depth: u32,
}
