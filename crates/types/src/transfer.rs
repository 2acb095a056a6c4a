use crate::primitives::{Address, Hash32};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// The keccak256 topic of the standard `Transfer(address,address,uint256)`
/// event, shared by ERC20 and ERC721.
pub const ERC20_TRANSFER_TOPIC: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Erc20Transfer {
    pub contract: Address,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub log_index: u32,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Erc721Transfer {
    pub contract: Address,
    pub from: Address,
    pub to: Address,
    pub token_id: U256,
    pub tx_hash: Hash32,
    pub block_number: u64,
    pub log_index: u32,
    pub timestamp: u64,
}

/// Current-owner view for a single `(contract, token_id)`. Maintained as a
/// side effect of `SaveERC721Transfer` (§4.4.2); never written directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NftOwnership {
    pub contract: Address,
    pub token_id: U256,
    pub owner: Address,
}

pub fn is_zero_address(addr: &Address) -> bool {
    addr.is_zero()
}
