use crate::primitives::{Address, Hash32};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// §4.4.4 "Proposal lifecycle". Transitions are unconstrained at the
/// storage layer; validity is enforced by the caller.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProposalStatus {
    None,
    Voting,
    Approved,
    Executed,
    Cancelled,
    Expired,
    Failed,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub contract: Address,
    pub id: u64,
    pub proposer: Address,
    pub status: ProposalStatus,
    pub created_at_block: u64,
    pub created_at: u64,
    /// Present once `status` transitions to `Executed`.
    pub executed_at: Option<u64>,
    pub description: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub contract: Address,
    pub proposal_id: u64,
    pub voter: Address,
    pub support: bool,
    pub weight_block_number: u64,
    pub tx_hash: Hash32,
    pub block_number: u64,
}
