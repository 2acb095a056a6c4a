use crate::primitives::{Address, Hash32};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// EIP-2718 transaction type tag, extended with the non-standard
/// fee-delegation envelope the source chain recognizes (§9, GLOSSARY).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionType {
    Legacy,
    AccessList,
    DynamicFee,
    Blob,
    /// Decimal 22 / hex 0x16: pairs the sender's signature with a
    /// fee-payer signature so the sender pays no gas.
    FeeDelegated,
    Other(u8),
}

impl TransactionType {
    pub fn tag(&self) -> u8 {
        match self {
            TransactionType::Legacy => 0,
            TransactionType::AccessList => 1,
            TransactionType::DynamicFee => 2,
            TransactionType::Blob => 3,
            TransactionType::FeeDelegated => 22,
            TransactionType::Other(tag) => *tag,
        }
    }

    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0 => TransactionType::Legacy,
            1 => TransactionType::AccessList,
            2 => TransactionType::DynamicFee,
            3 => TransactionType::Blob,
            22 => TransactionType::FeeDelegated,
            other => TransactionType::Other(other),
        }
    }
}

/// A transaction as it appears in a block body. Identified by `hash`;
/// belongs to exactly one block at `TxLocation.tx_index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: Hash32,
    pub tx_type: TransactionType,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_price: U256,
    pub gas_tip_cap: Option<U256>,
    pub gas_fee_cap: Option<U256>,
    pub gas_limit: u64,
    pub nonce: u64,
    pub input: Vec<u8>,
}
