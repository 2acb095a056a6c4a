//! Result shapes for the aggregate queries of §4.5.3. Every aggregate walks
//! a block range and reduces it into one of these; none is persisted.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::primitives::Address;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GasStats {
    pub tx_count: u64,
    pub total_gas_used: u64,
    pub total_gas_cost: U256,
}

impl GasStats {
    pub fn avg_gas_price(&self) -> U256 {
        if self.total_gas_used == 0 {
            U256::ZERO
        } else {
            self.total_gas_cost / U256::from(self.total_gas_used)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressGasUsage {
    pub address: Address,
    pub gas_used: u64,
    pub tx_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub block_count: u64,
    pub tx_count: u64,
    pub total_gas_used: u64,
    pub avg_gas_price: U256,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinerBlockCount {
    pub miner: Address,
    pub block_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeDelegationStats {
    pub delegated_tx_count: u64,
    pub distinct_fee_payers: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeePayerTxCount {
    pub fee_payer: Address,
    pub tx_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeePayerStats {
    pub tx_count: u64,
    pub total_gas_sponsored: u64,
}
