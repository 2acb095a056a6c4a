use crate::primitives::{Address, Hash32};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// A single emitted event, ordered within its transaction by `log_index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    /// 0-4 topics; topic 0 is conventionally the event signature hash.
    pub topics: Vec<Hash32>,
    pub data: Vec<u8>,
    pub log_index: u32,
}

/// One receipt per transaction, keyed by transaction hash. `tx_hash` is
/// restored by the read path on decode (§4.5.1) — it is never part of the
/// persisted payload, since the key already carries it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(skip)]
    pub tx_hash: Hash32,
    pub status: u8,
    pub cumulative_gas_used: u64,
    pub gas_used: u64,
    pub logs: Vec<Log>,
    pub contract_address: Option<Address>,
    pub effective_gas_price: U256,
}

impl Receipt {
    /// Validates the fields `IngestBlock` (§4.4.1 step 3) requires before a
    /// receipt may be staged: non-zero status domain and a sane gas
    /// relationship.
    pub fn validate(&self) -> Result<(), String> {
        if self.status > 1 {
            return Err(format!("receipt status {} is not 0 or 1", self.status));
        }
        if self.cumulative_gas_used < self.gas_used {
            return Err(format!(
                "cumulative_gas_used {} is less than gas_used {}",
                self.cumulative_gas_used, self.gas_used
            ));
        }
        Ok(())
    }
}
