//! Domain types shared by every crate in the workspace: the primary
//! entities (§3.1), the derived records the write path maintains (§3.2),
//! and the error kinds of §7.

pub mod aggregate;
pub mod balance;
pub mod block;
pub mod contract;
pub mod error;
pub mod fee_delegation;
pub mod governance;
pub mod internal_tx;
pub mod location;
pub mod primitives;
pub mod receipt;
pub mod search;
pub mod setcode;
pub mod system_events;
pub mod token_metadata;
pub mod transaction;
pub mod transfer;

pub use aggregate::{
    AddressGasUsage, FeeDelegationStats, FeePayerStats, FeePayerTxCount, GasStats,
    MinerBlockCount, NetworkMetrics,
};
pub use balance::BalanceSnapshot;
pub use block::Block;
pub use contract::ContractCreation;
pub use error::{Error, Result};
pub use fee_delegation::FeeDelegationTxMeta;
pub use governance::{Proposal, ProposalStatus, Vote};
pub use internal_tx::{CallType, InternalTransaction};
pub use location::TxLocation;
pub use primitives::{Address, Hash32, Sign, SignedU256};
pub use receipt::{Log, Receipt};
pub use search::{SearchResult, SearchResultType, SearchTypeFilter};
pub use setcode::{AddressDelegationState, AddressSetCodeStats, SetCodeAuthorization};
pub use system_events::{
    BlacklistEvent, BurnEvent, DepositMintProposal, EmergencyPauseEvent, GasTipEvent,
    MemberChangeEvent, MintEvent, MinterConfigEvent, ValidatorChangeEvent,
};
pub use token_metadata::{TokenMetadata, TokenStandard};
pub use transaction::{Transaction, TransactionType};
pub use transfer::{Erc20Transfer, Erc721Transfer, NftOwnership};

/// Default and maximum page sizes for prefix-range listings (§4.5.2).
pub const DEFAULT_PAGINATION_LIMIT: usize = 50;
pub const MAX_PAGINATION_LIMIT: usize = 1000;

/// Normalizes `(limit, offset)` per the pagination laws in §4.5.2/§8:
/// `limit <= 0` becomes the default, `limit > MAX` clamps to `MAX`, and
/// `offset < 0` becomes `0`.
pub fn normalize_pagination(limit: i64, offset: i64) -> (usize, usize) {
    let limit = if limit <= 0 {
        DEFAULT_PAGINATION_LIMIT
    } else {
        (limit as usize).min(MAX_PAGINATION_LIMIT)
    };
    let offset = offset.max(0) as usize;
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_pagination_defaults_and_clamps() {
        assert_eq!(normalize_pagination(0, -5), (DEFAULT_PAGINATION_LIMIT, 0));
        assert_eq!(
            normalize_pagination(i64::MAX, 3),
            (MAX_PAGINATION_LIMIT, 3)
        );
        assert_eq!(normalize_pagination(10, 4), (10, 4));
    }
}
