//! Builders and parsers for every key namespace in §6.1. Functions are
//! grouped by the entity they key, in the same order as the persisted key
//! layout table.

use crate::{
    expect_segments, hex_address, hex_hash, pad_idx, pad_num, parse_hex_address, parse_hex_hash,
    parse_idx, parse_num, segments,
};
use chainidx_types::{Address, Hash32, ProposalStatus, Result, TokenStandard};

// ---------------------------------------------------------------------
// Meta / counters
// ---------------------------------------------------------------------

pub fn latest_height_key() -> Vec<u8> {
    b"/meta/lh".to_vec()
}

pub fn transaction_count_key() -> Vec<u8> {
    b"/meta/tc".to_vec()
}

// ---------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------

pub fn block_key(h: u64) -> Vec<u8> {
    format!("/data/blocks/{}", pad_num(h)).into_bytes()
}

pub fn parse_block_key(key: &[u8]) -> Result<u64> {
    let segs = segments(key)?;
    expect_segments(&segs, &["data", "blocks"])?;
    parse_num(segs[2])
}

pub fn block_hash_index_key(hash: &Hash32) -> Vec<u8> {
    format!("/index/blockh/{}", hex_hash(hash)).into_bytes()
}

pub fn block_timestamp_key(ts: u64, h: u64) -> Vec<u8> {
    format!("/index/block_timestamp/{}/{}", pad_num(ts), pad_num(h)).into_bytes()
}

pub fn block_timestamp_prefix(ts: u64) -> Vec<u8> {
    format!("/index/block_timestamp/{}/", pad_num(ts)).into_bytes()
}

pub fn parse_block_timestamp_key(key: &[u8]) -> Result<(u64, u64)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "block_timestamp"])?;
    Ok((parse_num(segs[2])?, parse_num(segs[3])?))
}

// ---------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------

pub fn tx_key(h: u64, idx: u32) -> Vec<u8> {
    format!("/data/txs/{}/{}", pad_num(h), pad_idx(idx)).into_bytes()
}

pub fn tx_block_prefix(h: u64) -> Vec<u8> {
    format!("/data/txs/{}/", pad_num(h)).into_bytes()
}

pub fn parse_tx_key(key: &[u8]) -> Result<(u64, u32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["data", "txs"])?;
    Ok((parse_num(segs[2])?, parse_idx(segs[3])?))
}

pub fn tx_hash_index_key(tx_hash: &Hash32) -> Vec<u8> {
    format!("/index/txh/{}", hex_hash(tx_hash)).into_bytes()
}

pub fn receipt_key(tx_hash: &Hash32) -> Vec<u8> {
    format!("/data/receipts/{}", hex_hash(tx_hash)).into_bytes()
}

pub fn contract_address_key(tx_hash: &Hash32) -> Vec<u8> {
    format!("/data/contract_addr/{}", hex_hash(tx_hash)).into_bytes()
}

// ---------------------------------------------------------------------
// Address -> tx index
// ---------------------------------------------------------------------

pub fn address_tx_key(addr: &Address, seq: u64) -> Vec<u8> {
    format!("/index/addr/{}/{}", hex_address(addr), pad_num(seq)).into_bytes()
}

pub fn address_tx_prefix(addr: &Address) -> Vec<u8> {
    format!("/index/addr/{}/", hex_address(addr)).into_bytes()
}

pub fn parse_address_tx_key(key: &[u8]) -> Result<(Address, u64)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "addr"])?;
    Ok((parse_hex_address(segs[2])?, parse_num(segs[3])?))
}

// ---------------------------------------------------------------------
// ERC20 transfers
// ---------------------------------------------------------------------

pub fn erc20_transfer_key(tx_hash: &Hash32, log_index: u32) -> Vec<u8> {
    format!(
        "/data/erc20/transfer/{}/{}",
        hex_hash(tx_hash),
        pad_idx(log_index)
    )
    .into_bytes()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Erc20IndexDimension {
    Token,
    From,
    To,
}

impl Erc20IndexDimension {
    fn as_str(&self) -> &'static str {
        match self {
            Erc20IndexDimension::Token => "token",
            Erc20IndexDimension::From => "from",
            Erc20IndexDimension::To => "to",
        }
    }
}

pub fn erc20_index_key(
    dim: Erc20IndexDimension,
    addr: &Address,
    block: u64,
    log_index: u32,
) -> Vec<u8> {
    format!(
        "/index/erc20/{}/{}/{}/{}",
        dim.as_str(),
        hex_address(addr),
        pad_num(block),
        pad_idx(log_index)
    )
    .into_bytes()
}

pub fn erc20_index_prefix(dim: Erc20IndexDimension, addr: &Address) -> Vec<u8> {
    format!("/index/erc20/{}/{}/", dim.as_str(), hex_address(addr)).into_bytes()
}

pub fn parse_erc20_index_key(key: &[u8]) -> Result<(Erc20IndexDimension, Address, u64, u32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "erc20"])?;
    let dim = match segs[2] {
        "token" => Erc20IndexDimension::Token,
        "from" => Erc20IndexDimension::From,
        "to" => Erc20IndexDimension::To,
        other => return Err(chainidx_types::Error::invalid_key(format!("bad erc20 dimension {other:?}"))),
    };
    Ok((
        dim,
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_idx(segs[5])?,
    ))
}

// ---------------------------------------------------------------------
// ERC721 transfers / ownership
// ---------------------------------------------------------------------

pub fn erc721_transfer_key(tx_hash: &Hash32, log_index: u32) -> Vec<u8> {
    format!(
        "/data/erc721/transfer/{}/{}",
        hex_hash(tx_hash),
        pad_idx(log_index)
    )
    .into_bytes()
}

/// Token IDs are variable-width decimal; never used as a sort key, only in
/// point lookups of current ownership.
pub fn erc721_token_owner_key(contract: &Address, token_id_decimal: &str) -> Vec<u8> {
    format!(
        "/data/erc721/token_owner/{}/{}",
        hex_address(contract),
        token_id_decimal
    )
    .into_bytes()
}

pub fn erc721_owner_index_key(owner: &Address, contract: &Address, token_id_decimal: &str) -> Vec<u8> {
    format!(
        "/index/erc721/owner/{}/{}/{}",
        hex_address(owner),
        hex_address(contract),
        token_id_decimal
    )
    .into_bytes()
}

pub fn erc721_owner_index_prefix(owner: &Address) -> Vec<u8> {
    format!("/index/erc721/owner/{}/", hex_address(owner)).into_bytes()
}

pub fn parse_erc721_owner_index_key(key: &[u8]) -> Result<(Address, Address, String)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "erc721", "owner"])?;
    Ok((
        parse_hex_address(segs[3])?,
        parse_hex_address(segs[4])?,
        segs[5].to_string(),
    ))
}

// ---------------------------------------------------------------------
// Internal transactions (call traces)
// ---------------------------------------------------------------------

pub fn internal_tx_key(tx_hash: &Hash32, idx: u32) -> Vec<u8> {
    format!("/data/internal_tx/{}/{}", hex_hash(tx_hash), pad_idx(idx)).into_bytes()
}

pub fn internal_tx_prefix(tx_hash: &Hash32) -> Vec<u8> {
    format!("/data/internal_tx/{}/", hex_hash(tx_hash)).into_bytes()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressRole {
    From,
    To,
}

impl AddressRole {
    fn as_str(&self) -> &'static str {
        match self {
            AddressRole::From => "from",
            AddressRole::To => "to",
        }
    }
}

pub fn internal_tx_index_key(role: AddressRole, addr: &Address, block: u64, tx_hash: &Hash32) -> Vec<u8> {
    format!(
        "/index/internal/{}/{}/{}/{}",
        role.as_str(),
        hex_address(addr),
        pad_num(block),
        hex_hash(tx_hash)
    )
    .into_bytes()
}

pub fn internal_tx_index_prefix(role: AddressRole, addr: &Address) -> Vec<u8> {
    format!("/index/internal/{}/{}/", role.as_str(), hex_address(addr)).into_bytes()
}

pub fn parse_internal_tx_index_key(key: &[u8]) -> Result<(AddressRole, Address, u64, Hash32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "internal"])?;
    let role = match segs[2] {
        "from" => AddressRole::From,
        "to" => AddressRole::To,
        other => return Err(chainidx_types::Error::invalid_key(format!("bad role {other:?}"))),
    };
    Ok((
        role,
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_hex_hash(segs[5])?,
    ))
}

// ---------------------------------------------------------------------
// Contract creation
// ---------------------------------------------------------------------

pub fn contract_creation_key(contract: &Address) -> Vec<u8> {
    format!("/data/contract_creation/{}", hex_address(contract)).into_bytes()
}

pub fn contract_creator_index_key(creator: &Address, block: u64, contract: &Address) -> Vec<u8> {
    format!(
        "/index/contract/creator/{}/{}/{}",
        hex_address(creator),
        pad_num(block),
        hex_address(contract)
    )
    .into_bytes()
}

pub fn contract_creator_index_prefix(creator: &Address) -> Vec<u8> {
    format!("/index/contract/creator/{}/", hex_address(creator)).into_bytes()
}

pub fn parse_contract_creator_index_key(key: &[u8]) -> Result<(Address, u64, Address)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "contract", "creator"])?;
    Ok((
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_hex_address(segs[5])?,
    ))
}

pub fn contract_block_index_key(block: u64, contract: &Address) -> Vec<u8> {
    format!("/index/contract/block/{}/{}", pad_num(block), hex_address(contract)).into_bytes()
}

pub fn contract_block_index_prefix() -> Vec<u8> {
    b"/index/contract/block/".to_vec()
}

// ---------------------------------------------------------------------
// SetCode authorizations
// ---------------------------------------------------------------------

pub fn setcode_auth_key(tx_hash: &Hash32, auth_index: u32) -> Vec<u8> {
    format!("/data/setcode/auth/{}/{}", hex_hash(tx_hash), pad_idx(auth_index)).into_bytes()
}

pub fn setcode_auth_prefix(tx_hash: &Hash32) -> Vec<u8> {
    format!("/data/setcode/auth/{}/", hex_hash(tx_hash)).into_bytes()
}

pub fn setcode_target_index_key(target: &Address, block: u64, tx_hash: &Hash32, auth_index: u32) -> Vec<u8> {
    format!(
        "/index/setcode/target/{}/{}/{}/{}",
        hex_address(target),
        pad_num(block),
        hex_hash(tx_hash),
        pad_idx(auth_index)
    )
    .into_bytes()
}

pub fn setcode_target_index_prefix(target: &Address) -> Vec<u8> {
    format!("/index/setcode/target/{}/", hex_address(target)).into_bytes()
}

pub fn parse_setcode_target_index_key(key: &[u8]) -> Result<(Address, u64, Hash32, u32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "setcode", "target"])?;
    Ok((
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_hex_hash(segs[5])?,
        parse_idx(segs[6])?,
    ))
}

pub fn setcode_authority_index_key(authority: &Address, block: u64, tx_hash: &Hash32, auth_index: u32) -> Vec<u8> {
    format!(
        "/index/setcode/authority/{}/{}/{}/{}",
        hex_address(authority),
        pad_num(block),
        hex_hash(tx_hash),
        pad_idx(auth_index)
    )
    .into_bytes()
}

pub fn setcode_authority_index_prefix(authority: &Address) -> Vec<u8> {
    format!("/index/setcode/authority/{}/", hex_address(authority)).into_bytes()
}

pub fn parse_setcode_authority_index_key(key: &[u8]) -> Result<(Address, u64, Hash32, u32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "setcode", "authority"])?;
    Ok((
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_hex_hash(segs[5])?,
        parse_idx(segs[6])?,
    ))
}

pub fn setcode_block_index_key(block: u64, tx_hash: &Hash32, auth_index: u32) -> Vec<u8> {
    format!(
        "/index/setcode/block/{}/{}/{}",
        pad_num(block),
        hex_hash(tx_hash),
        pad_idx(auth_index)
    )
    .into_bytes()
}

pub fn setcode_block_index_prefix() -> Vec<u8> {
    b"/index/setcode/block/".to_vec()
}

pub fn setcode_tx_index_key(tx_hash: &Hash32, auth_index: u32) -> Vec<u8> {
    format!("/index/setcode/tx/{}/{}", hex_hash(tx_hash), pad_idx(auth_index)).into_bytes()
}

pub fn setcode_tx_index_prefix(tx_hash: &Hash32) -> Vec<u8> {
    format!("/index/setcode/tx/{}/", hex_hash(tx_hash)).into_bytes()
}

pub fn setcode_stats_key(addr: &Address) -> Vec<u8> {
    format!("/data/setcode/stats/{}", hex_address(addr)).into_bytes()
}

pub fn setcode_delegation_state_key(addr: &Address) -> Vec<u8> {
    format!("/data/setcode/delegation/{}", hex_address(addr)).into_bytes()
}

// ---------------------------------------------------------------------
// Token metadata
// ---------------------------------------------------------------------

pub fn token_metadata_key(addr: &Address) -> Vec<u8> {
    format!("/data/token_meta/{}", hex_address(addr)).into_bytes()
}

pub fn token_standard_index_key(standard: TokenStandard, addr: &Address) -> Vec<u8> {
    format!(
        "/index/token_meta/standard/{}/{}",
        standard.as_str(),
        hex_address(addr)
    )
    .into_bytes()
}

pub fn token_standard_index_prefix(standard: TokenStandard) -> Vec<u8> {
    format!("/index/token_meta/standard/{}/", standard.as_str()).into_bytes()
}

pub fn parse_token_standard_index_key(key: &[u8]) -> Result<(TokenStandard, Address)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "token_meta", "standard"])?;
    let standard = segs[3]
        .parse()
        .map_err(|e| chainidx_types::Error::invalid_key(format!("bad token standard {:?}: {e}", segs[3])))?;
    Ok((standard, parse_hex_address(segs[4])?))
}

pub fn token_name_index_key(name: &str, addr: &Address) -> Vec<u8> {
    format!("/index/token_meta/name/{}/{}", name, hex_address(addr)).into_bytes()
}

pub fn token_symbol_index_key(symbol: &str, addr: &Address) -> Vec<u8> {
    format!("/index/token_meta/symbol/{}/{}", symbol, hex_address(addr)).into_bytes()
}

// ---------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------

pub fn address_balance_key(addr: &Address, seq: u64) -> Vec<u8> {
    format!("/data/balance/{}/{}", hex_address(addr), pad_num(seq)).into_bytes()
}

pub fn address_balance_prefix(addr: &Address) -> Vec<u8> {
    format!("/data/balance/{}/", hex_address(addr)).into_bytes()
}

pub fn address_balance_latest_key(addr: &Address) -> Vec<u8> {
    format!("/data/balance_latest/{}", hex_address(addr)).into_bytes()
}

pub fn parse_address_balance_key(key: &[u8]) -> Result<(Address, u64)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["data", "balance"])?;
    Ok((parse_hex_address(segs[2])?, parse_num(segs[3])?))
}

// ---------------------------------------------------------------------
// System-contract events (mint/burn/minter config/validator/gas tip/
// blacklist/member change/emergency pause/deposit mint) and governance
// (proposal/vote)
// ---------------------------------------------------------------------

pub fn sys_mint_key(contract: &Address, block: u64, log_index: u32) -> Vec<u8> {
    format!(
        "/data/sys/mint/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        pad_idx(log_index)
    )
    .into_bytes()
}

pub fn sys_mint_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/mint/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_burn_key(contract: &Address, block: u64, log_index: u32) -> Vec<u8> {
    format!(
        "/data/sys/burn/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        pad_idx(log_index)
    )
    .into_bytes()
}

pub fn sys_burn_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/burn/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_minter_config_key(contract: &Address, block: u64, tx_hash: &Hash32) -> Vec<u8> {
    format!(
        "/data/sys/minter_config/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        hex_hash(tx_hash)
    )
    .into_bytes()
}

pub fn sys_validator_change_key(contract: &Address, block: u64, validator: &Address) -> Vec<u8> {
    format!(
        "/data/sys/validator_change/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        hex_address(validator)
    )
    .into_bytes()
}

pub fn sys_validator_change_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/validator_change/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_gas_tip_key(contract: &Address, block: u64) -> Vec<u8> {
    format!("/data/sys/gas_tip/{}/{}", hex_address(contract), pad_num(block)).into_bytes()
}

pub fn sys_gas_tip_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/gas_tip/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_blacklist_event_key(contract: &Address, block: u64, address: &Address) -> Vec<u8> {
    format!(
        "/data/sys/blacklist/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        hex_address(address)
    )
    .into_bytes()
}

pub fn sys_member_change_key(contract: &Address, block: u64, member: &Address) -> Vec<u8> {
    format!(
        "/data/sys/member_change/{}/{}/{}",
        hex_address(contract),
        pad_num(block),
        hex_address(member)
    )
    .into_bytes()
}

pub fn sys_member_change_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/member_change/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_emergency_pause_key(contract: &Address, block: u64) -> Vec<u8> {
    format!(
        "/data/sys/emergency_pause/{}/{}",
        hex_address(contract),
        pad_num(block)
    )
    .into_bytes()
}

pub fn sys_emergency_pause_prefix(contract: &Address) -> Vec<u8> {
    format!("/data/sys/emergency_pause/{}/", hex_address(contract)).into_bytes()
}

pub fn sys_deposit_mint_proposal_key(contract: &Address, id: u64) -> Vec<u8> {
    format!(
        "/data/sys/deposit_mint/{}/{}",
        hex_address(contract),
        pad_num(id)
    )
    .into_bytes()
}

pub fn sys_proposal_key(contract: &Address, id: u64) -> Vec<u8> {
    format!("/data/sys/proposal/{}/{}", hex_address(contract), pad_num(id)).into_bytes()
}

pub fn sys_vote_key(contract: &Address, proposal_id: u64, voter: &Address) -> Vec<u8> {
    format!(
        "/data/sys/vote/{}/{}/{}",
        hex_address(contract),
        pad_num(proposal_id),
        hex_address(voter)
    )
    .into_bytes()
}

pub fn sys_vote_prefix(contract: &Address, proposal_id: u64) -> Vec<u8> {
    format!("/data/sys/vote/{}/{}/", hex_address(contract), pad_num(proposal_id)).into_bytes()
}

// ---------------------------------------------------------------------
// Active-set markers and proposal status index
// ---------------------------------------------------------------------

pub fn active_minter_key(contract: &Address, minter: &Address) -> Vec<u8> {
    format!(
        "/index/sys/active_minter/{}/{}",
        hex_address(contract),
        hex_address(minter)
    )
    .into_bytes()
}

pub fn active_validator_key(contract: &Address, validator: &Address) -> Vec<u8> {
    format!(
        "/index/sys/active_validator/{}/{}",
        hex_address(contract),
        hex_address(validator)
    )
    .into_bytes()
}

pub fn active_validator_prefix(contract: &Address) -> Vec<u8> {
    format!("/index/sys/active_validator/{}/", hex_address(contract)).into_bytes()
}

pub fn blacklist_marker_key(contract: &Address, address: &Address) -> Vec<u8> {
    format!(
        "/index/sys/blacklist/{}/{}",
        hex_address(contract),
        hex_address(address)
    )
    .into_bytes()
}

pub fn proposal_status_index_key(contract: &Address, status: ProposalStatus, id: u64) -> Vec<u8> {
    format!(
        "/index/sys/proposal_status/{}/{}/{}",
        hex_address(contract),
        status,
        pad_num(id)
    )
    .into_bytes()
}

pub fn proposal_status_index_prefix_for_status(contract: &Address, status: ProposalStatus) -> Vec<u8> {
    format!("/index/sys/proposal_status/{}/{}/", hex_address(contract), status).into_bytes()
}

pub fn parse_proposal_status_index_key(key: &[u8]) -> Result<(Address, u64)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "sys", "proposal_status"])?;
    Ok((parse_hex_address(segs[3])?, parse_num(segs[5])?))
}

// ---------------------------------------------------------------------
// Fee delegation
// ---------------------------------------------------------------------

pub fn fee_delegation_meta_key(tx_hash: &Hash32) -> Vec<u8> {
    format!("/data/fee_delegation/{}", hex_hash(tx_hash)).into_bytes()
}

pub fn fee_delegation_payer_index_key(fee_payer: &Address, block: u64, tx_hash: &Hash32) -> Vec<u8> {
    format!(
        "/index/fee_delegation/payer/{}/{}/{}",
        hex_address(fee_payer),
        pad_num(block),
        hex_hash(tx_hash)
    )
    .into_bytes()
}

pub fn fee_delegation_payer_index_prefix(fee_payer: &Address) -> Vec<u8> {
    format!("/index/fee_delegation/payer/{}/", hex_address(fee_payer)).into_bytes()
}

pub fn parse_fee_delegation_payer_index_key(key: &[u8]) -> Result<(Address, u64, Hash32)> {
    let segs = segments(key)?;
    expect_segments(&segs, &["index", "fee_delegation", "payer"])?;
    Ok((
        parse_hex_address(segs[3])?,
        parse_num(segs[4])?,
        parse_hex_hash(segs[5])?,
    ))
}
