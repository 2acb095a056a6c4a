use crate::primitives::Address;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TokenStandard {
    #[default]
    Unknown,
    Erc20,
    Erc721,
    Erc1155,
}

impl TokenStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStandard::Unknown => "UNKNOWN",
            TokenStandard::Erc20 => "ERC20",
            TokenStandard::Erc721 => "ERC721",
            TokenStandard::Erc1155 => "ERC1155",
        }
    }
}

impl std::str::FromStr for TokenStandard {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN" => Ok(TokenStandard::Unknown),
            "ERC20" => Ok(TokenStandard::Erc20),
            "ERC721" => Ok(TokenStandard::Erc721),
            "ERC1155" => Ok(TokenStandard::Erc1155),
            other => Err(crate::Error::invalid_data(format!("unknown token standard {other:?}"))),
        }
    }
}

/// Cached metadata for a token contract, consulted/overwritten in the order
/// documented by §9 "Token-metadata priority": hard-coded registry, then
/// this cache, then the optional on-demand fetcher.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub address: Address,
    pub standard: TokenStandard,
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
    pub base_uri: Option<String>,
    pub supports_enumerable: bool,
    pub supports_metadata: bool,
    pub detected_at: u64,
    pub created_at: u64,
    pub updated_at: u64,
}
