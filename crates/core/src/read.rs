//! Read Path (§4.5.1 point lookups, §4.5.2 prefix-range pagination). Point
//! lookups return `Option<T>` (a missing key is not an error); range
//! listings apply the pagination laws in `chainidx_types::normalize_pagination`
//! and silently skip dangling index entries rather than aborting the whole
//! page, since an index pointing at a primary record that was deleted by
//! `delete_block` is an expected, not exceptional, condition (§9).

use alloy_primitives::U256;
use chainidx_types::{
    Address, BalanceSnapshot, Block, ContractCreation, Erc20Transfer, Error, FeeDelegationTxMeta,
    Hash32, InternalTransaction, NftOwnership, Proposal, ProposalStatus, Receipt, Result,
    SetCodeAuthorization, TokenMetadata, TokenStandard, Transaction, TxLocation, Vote,
};

use crate::engine::Engine;

/// Walks `prefix`, decoding each `(key, value)` pair with `decode`.
/// Entries whose `decode` returns `NotFound` (a dangling pointer) are
/// skipped rather than propagated; every other error aborts the page.
fn paginate<T>(
    engine: &Engine,
    prefix: &[u8],
    limit: i64,
    offset: i64,
    decode: impl Fn(&[u8], &[u8]) -> Result<T>,
) -> Result<Vec<T>> {
    let (limit, offset) = chainidx_types::normalize_pagination(limit, offset);
    let mut out = Vec::with_capacity(limit.min(1024));
    let mut skipped = 0usize;
    engine.store.iterate(prefix, None, |k, v| {
        if skipped < offset {
            skipped += 1;
            return Ok(true);
        }
        match decode(k, v) {
            Ok(item) => out.push(item),
            Err(e) if e.is_not_found() => {
                tracing::warn!(key = %String::from_utf8_lossy(k), "skipping dangling index entry");
            }
            Err(e) => return Err(e),
        }
        Ok(out.len() < limit)
    })?;
    Ok(out)
}

/// Same protocol as [`paginate`] but for "newest-first" listings (§4.5.2):
/// seeks to the end of `prefix` and walks backward.
fn paginate_rev<T>(
    engine: &Engine,
    prefix: &[u8],
    limit: i64,
    offset: i64,
    decode: impl Fn(&[u8], &[u8]) -> Result<T>,
) -> Result<Vec<T>> {
    let (limit, offset) = chainidx_types::normalize_pagination(limit, offset);
    let mut out = Vec::with_capacity(limit.min(1024));
    let mut skipped = 0usize;
    engine.store.iterate_rev(prefix, None, |k, v| {
        if skipped < offset {
            skipped += 1;
            return Ok(true);
        }
        match decode(k, v) {
            Ok(item) => out.push(item),
            Err(e) if e.is_not_found() => {
                tracing::warn!(key = %String::from_utf8_lossy(k), "skipping dangling index entry");
            }
            Err(e) => return Err(e),
        }
        Ok(out.len() < limit)
    })?;
    Ok(out)
}

impl Engine {
    // -- blocks ------------------------------------------------------------

    pub fn get_block(&self, height: u64) -> Result<Option<Block>> {
        match self.store.get(&chainidx_schema::block_key(height))? {
            Some(bytes) => Ok(Some(chainidx_codec::decode_block(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_block_by_hash(&self, hash: &Hash32) -> Result<Option<Block>> {
        match self.store.get(&chainidx_schema::block_hash_index_key(hash))? {
            Some(bytes) => self.get_block(chainidx_codec::decode_u64(&bytes)?),
            None => Ok(None),
        }
    }

    pub fn list_blocks_by_timestamp(&self, ts: u64, limit: i64, offset: i64) -> Result<Vec<Block>> {
        paginate(self, &chainidx_schema::block_timestamp_prefix(ts), limit, offset, |_, v| {
            let height = chainidx_codec::decode_u64(v)?;
            self.get_block(height)?.ok_or(Error::NotFound)
        })
    }

    // -- transactions --------------------------------------------------------

    pub fn get_transaction_location(&self, hash: &Hash32) -> Result<Option<TxLocation>> {
        match self.store.get(&chainidx_schema::tx_hash_index_key(hash))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_transaction(&self, hash: &Hash32) -> Result<Option<Transaction>> {
        let Some(location) = self.get_transaction_location(hash)? else {
            return Ok(None);
        };
        let key = chainidx_schema::tx_key(location.block_height, location.tx_index);
        match self.store.get(&key)? {
            Some(bytes) => Ok(Some(chainidx_codec::decode_transaction(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_block_transactions(&self, height: u64) -> Result<Vec<Transaction>> {
        let mut out = Vec::new();
        self.store
            .iterate(&chainidx_schema::tx_block_prefix(height), None, |_, v| {
                out.push(chainidx_codec::decode_transaction(v)?);
                Ok(true)
            })?;
        Ok(out)
    }

    pub fn get_receipt(&self, hash: &Hash32) -> Result<Option<Receipt>> {
        match self.store.get(&chainidx_schema::receipt_key(hash))? {
            Some(bytes) => Ok(Some(chainidx_codec::decode_receipt(&bytes, *hash)?)),
            None => Ok(None),
        }
    }

    pub fn get_contract_address(&self, tx_hash: &Hash32) -> Result<Option<Address>> {
        match self.store.get(&chainidx_schema::contract_address_key(tx_hash))? {
            Some(bytes) => Ok(Some(Address::from_slice(&bytes))),
            None => Ok(None),
        }
    }

    /// §4.4.3 address index: transaction hashes touching `addr`, in
    /// ascending write-sequence order.
    pub fn list_address_transactions(&self, addr: &Address, limit: i64, offset: i64) -> Result<Vec<Hash32>> {
        paginate(self, &chainidx_schema::address_tx_prefix(addr), limit, offset, |_, v| {
            Ok(Hash32::from_slice(v))
        })
    }

    // -- contract creation ---------------------------------------------------

    pub fn get_contract_creation(&self, contract: &Address) -> Result<Option<ContractCreation>> {
        match self.store.get(&chainidx_schema::contract_creation_key(contract))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// §4.5.2: contract deployments are a newest-first listing.
    pub fn list_contracts_by_creator(&self, creator: &Address, limit: i64, offset: i64) -> Result<Vec<ContractCreation>> {
        paginate_rev(self, &chainidx_schema::contract_creator_index_prefix(creator), limit, offset, |k, _| {
            let (_, _, contract) = chainidx_schema::parse_contract_creator_index_key(k)?;
            self.get_contract_creation(&contract)?.ok_or(Error::NotFound)
        })
    }

    // -- ERC20 -----------------------------------------------------------------

    pub fn get_erc20_transfer(&self, key: &[u8]) -> Result<Option<Erc20Transfer>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_erc20_transfers(
        &self,
        dim: chainidx_schema::Erc20IndexDimension,
        addr: &Address,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Erc20Transfer>> {
        paginate(self, &chainidx_schema::erc20_index_prefix(dim, addr), limit, offset, |_, v| {
            self.get_erc20_transfer(v)?.ok_or(Error::NotFound)
        })
    }

    // -- ERC721 ------------------------------------------------------------

    pub fn get_erc721_owner(&self, contract: &Address, token_id: &U256) -> Result<Option<NftOwnership>> {
        self.erc721_owner(contract, token_id)
    }

    pub fn list_erc721_owned_tokens(&self, owner: &Address, limit: i64, offset: i64) -> Result<Vec<NftOwnership>> {
        paginate(self, &chainidx_schema::erc721_owner_index_prefix(owner), limit, offset, |k, _| {
            let (owner, contract, token_id) = chainidx_schema::parse_erc721_owner_index_key(k)?;
            Ok(NftOwnership {
                contract,
                token_id: token_id
                    .parse()
                    .map_err(|e| Error::invalid_data(format!("bad token id {token_id:?}: {e}")))?,
                owner,
            })
        })
    }

    // -- internal transactions -------------------------------------------

    pub fn list_internal_transactions(&self, tx_hash: &Hash32) -> Result<Vec<InternalTransaction>> {
        let mut out = Vec::new();
        self.store
            .iterate(&chainidx_schema::internal_tx_prefix(tx_hash), None, |_, v| {
                out.push(chainidx_codec::json::decode(v)?);
                Ok(true)
            })?;
        Ok(out)
    }

    pub fn list_internal_transactions_by_address(
        &self,
        role: chainidx_schema::AddressRole,
        addr: &Address,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(Hash32, u64)>> {
        paginate(self, &chainidx_schema::internal_tx_index_prefix(role, addr), limit, offset, |k, _| {
            let (_, _, block, tx_hash) = chainidx_schema::parse_internal_tx_index_key(k)?;
            Ok((tx_hash, block))
        })
    }

    // -- setcode -----------------------------------------------------------

    pub fn get_setcode_authorization(&self, tx_hash: &Hash32, auth_index: u32) -> Result<Option<SetCodeAuthorization>> {
        match self.store.get(&chainidx_schema::setcode_auth_key(tx_hash, auth_index))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// §4.5.2: "recent setcode auth" is a newest-first listing.
    pub fn list_setcode_authorizations_by_target(&self, target: &Address, limit: i64, offset: i64) -> Result<Vec<SetCodeAuthorization>> {
        paginate_rev(self, &chainidx_schema::setcode_target_index_prefix(target), limit, offset, |k, _| {
            let (_, _, tx_hash, auth_index) = chainidx_schema::parse_setcode_target_index_key(k)?;
            self.get_setcode_authorization(&tx_hash, auth_index)?.ok_or(Error::NotFound)
        })
    }

    pub fn list_setcode_authorizations_by_authority(&self, authority: &Address, limit: i64, offset: i64) -> Result<Vec<SetCodeAuthorization>> {
        paginate_rev(self, &chainidx_schema::setcode_authority_index_prefix(authority), limit, offset, |k, _| {
            let (_, _, tx_hash, auth_index) = chainidx_schema::parse_setcode_authority_index_key(k)?;
            self.get_setcode_authorization(&tx_hash, auth_index)?.ok_or(Error::NotFound)
        })
    }

    // -- token metadata ------------------------------------------------------

    pub fn get_token_metadata(&self, addr: &Address) -> Result<Option<TokenMetadata>> {
        match self.store.get(&chainidx_schema::token_metadata_key(addr))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_tokens_by_standard(&self, standard: TokenStandard, limit: i64, offset: i64) -> Result<Vec<TokenMetadata>> {
        paginate(self, &chainidx_schema::token_standard_index_prefix(standard), limit, offset, |k, _| {
            let (_, addr) = chainidx_schema::parse_token_standard_index_key(k)?;
            self.get_token_metadata(&addr)?.ok_or(Error::NotFound)
        })
    }

    // -- balances ------------------------------------------------------------

    pub fn get_address_balance_latest(&self, addr: &Address) -> Result<Option<BalanceSnapshot>> {
        match self.store.get(&chainidx_schema::address_balance_latest_key(addr))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_address_balance_history(&self, addr: &Address, limit: i64, offset: i64) -> Result<Vec<BalanceSnapshot>> {
        paginate(self, &chainidx_schema::address_balance_prefix(addr), limit, offset, |_, v| {
            chainidx_codec::json::decode(v)
        })
    }

    /// §9 "Balance history semantics": walks snapshots in insertion (hence
    /// block) order and returns the last one observed at or before
    /// `block_number` — the first snapshot past it ends the scan. Relies on
    /// the writer's guarantee that snapshots are appended in block order.
    pub fn get_address_balance(&self, addr: &Address, block_number: u64) -> Result<Option<BalanceSnapshot>> {
        let mut result = None;
        self.store
            .iterate(&chainidx_schema::address_balance_prefix(addr), None, |_, v| {
                let snapshot: BalanceSnapshot = chainidx_codec::json::decode(v)?;
                if snapshot.block_number > block_number {
                    return Ok(false);
                }
                result = Some(snapshot);
                Ok(true)
            })?;
        Ok(result)
    }

    // -- fee delegation --------------------------------------------------

    pub fn get_fee_delegation_meta(&self, tx_hash: &Hash32) -> Result<Option<FeeDelegationTxMeta>> {
        match self.store.get(&chainidx_schema::fee_delegation_meta_key(tx_hash))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_fee_delegation_by_payer(&self, payer: &Address, limit: i64, offset: i64) -> Result<Vec<FeeDelegationTxMeta>> {
        paginate(self, &chainidx_schema::fee_delegation_payer_index_prefix(payer), limit, offset, |k, _| {
            let (_, _, tx_hash) = chainidx_schema::parse_fee_delegation_payer_index_key(k)?;
            self.get_fee_delegation_meta(&tx_hash)?.ok_or(Error::NotFound)
        })
    }

    // -- governance ------------------------------------------------------

    pub fn get_proposal(&self, contract: &Address, id: u64) -> Result<Option<Proposal>> {
        match self.store.get(&chainidx_schema::sys_proposal_key(contract, id))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_proposals_by_status(&self, contract: &Address, status: ProposalStatus, limit: i64, offset: i64) -> Result<Vec<Proposal>> {
        paginate(
            self,
            &chainidx_schema::proposal_status_index_prefix_for_status(contract, status),
            limit,
            offset,
            |k, _| {
                let (contract, id) = chainidx_schema::parse_proposal_status_index_key(k)?;
                self.get_proposal(&contract, id)?.ok_or(Error::NotFound)
            },
        )
    }

    pub fn list_votes_for_proposal(&self, contract: &Address, proposal_id: u64) -> Result<Vec<Vote>> {
        let mut out = Vec::new();
        self.store
            .iterate(&chainidx_schema::sys_vote_prefix(contract, proposal_id), None, |_, v| {
                out.push(chainidx_codec::json::decode(v)?);
                Ok(true)
            })?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::IngestBlockRequest;
    use alloy_primitives::{address, B256};
    use chainidx_types::{Log, TransactionType};

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    fn ingest(engine: &Engine, height: u64, addr: Address) -> Hash32 {
        let tx_hash = B256::repeat_byte(height as u8);
        let block = Block {
            number: height,
            hash: B256::repeat_byte((height + 100) as u8),
            parent_hash: B256::ZERO,
            timestamp: 1_700_000_000 + height,
            miner: address!("000000000000000000000000000000000000aaaa"),
            gas_limit: 30_000_000,
            gas_used: 21_000,
            transactions: vec![tx_hash],
        };
        let tx = Transaction {
            hash: tx_hash,
            tx_type: TransactionType::Legacy,
            from: addr,
            to: Some(address!("000000000000000000000000000000000000cccc")),
            value: U256::from(1u64),
            gas_price: U256::from(1u64),
            gas_tip_cap: None,
            gas_fee_cap: None,
            gas_limit: 21_000,
            nonce: 0,
            input: vec![],
        };
        let receipt = Receipt {
            tx_hash,
            status: 1,
            cumulative_gas_used: 21_000,
            gas_used: 21_000,
            logs: Vec::<Log>::new(),
            contract_address: None,
            effective_gas_price: U256::from(1u64),
        };
        engine
            .ingest_block(IngestBlockRequest { block, transactions: vec![tx], receipts: vec![receipt] })
            .unwrap();
        tx_hash
    }

    #[test]
    fn get_block_round_trips_through_hash_index() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000bbbb");
        ingest(&engine, 1, addr);
        let block = engine.get_block(1).unwrap().unwrap();
        let by_hash = engine.get_block_by_hash(&block.hash).unwrap().unwrap();
        assert_eq!(block, by_hash);
    }

    #[test]
    fn list_address_transactions_paginates_in_write_order() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000bbbb");
        let first = ingest(&engine, 1, addr);
        let second = ingest(&engine, 2, addr);

        let all = engine.list_address_transactions(&addr, 10, 0).unwrap();
        assert_eq!(all, vec![first, second]);

        let page1 = engine.list_address_transactions(&addr, 1, 0).unwrap();
        assert_eq!(page1, vec![first]);
        let page2 = engine.list_address_transactions(&addr, 1, 1).unwrap();
        assert_eq!(page2, vec![second]);
    }

    #[test]
    fn get_transaction_unknown_hash_returns_none() {
        let (_dir, engine) = open_engine();
        let missing = B256::repeat_byte(0xff);
        assert!(engine.get_transaction(&missing).unwrap().is_none());
        assert!(engine.get_transaction_location(&missing).unwrap().is_none());
    }

    #[test]
    fn get_address_balance_returns_last_snapshot_at_or_before_height() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000beef");
        let snap = |block_number: u64, balance: u64| chainidx_types::BalanceSnapshot {
            address: addr,
            block_number,
            balance: U256::from(balance),
            delta: chainidx_types::SignedU256::from(U256::from(balance)),
            tx_hash: B256::repeat_byte(block_number as u8),
        };
        engine.save_balance_snapshot(&snap(1, 10)).unwrap();
        engine.save_balance_snapshot(&snap(5, 50)).unwrap();
        engine.save_balance_snapshot(&snap(9, 90)).unwrap();

        assert!(engine.get_address_balance(&addr, 0).unwrap().is_none());
        assert_eq!(engine.get_address_balance(&addr, 4).unwrap().unwrap().balance, U256::from(10));
        assert_eq!(engine.get_address_balance(&addr, 5).unwrap().unwrap().balance, U256::from(50));
        assert_eq!(engine.get_address_balance(&addr, 100).unwrap().unwrap().balance, U256::from(90));
    }

    #[test]
    fn list_contracts_by_creator_skips_dangling_index_after_delete() {
        let (_dir, engine) = open_engine();
        let creator = address!("000000000000000000000000000000000000cdef");
        let contract = address!("0000000000000000000000000000000000001234");
        engine
            .save_contract_creation(&ContractCreation {
                contract_address: contract,
                creator,
                tx_hash: B256::repeat_byte(0x55),
                block_number: 1,
                timestamp: 1,
                bytecode_size: 10,
            })
            .unwrap();
        assert_eq!(engine.list_contracts_by_creator(&creator, 10, 0).unwrap().len(), 1);

        engine.store.delete(&chainidx_schema::contract_creation_key(&contract)).unwrap();
        assert!(engine.list_contracts_by_creator(&creator, 10, 0).unwrap().is_empty());
    }
}
