use crate::primitives::{Address, Hash32};
use serde::{Deserialize, Serialize};

/// Recorded when a receipt carries a non-zero `contract_address`: the
/// contract was deployed by `creator` in `tx_hash`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContractCreation {
    pub contract_address: Address,
    pub creator: Address,
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub timestamp: u64,
    pub bytecode_size: u64,
}
