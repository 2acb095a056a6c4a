//! Write Path, derived-record writers (§4.4.2). Each writer persists one
//! already-decoded record the caller produced (from parsed logs, traces,
//! or protocol-level events) plus whatever secondary indexes make that
//! record reachable by address, block, or status. None of these read logs
//! or bytecode themselves — that decoding happens upstream of this engine.

use alloy_primitives::U256;
use chainidx_types::{
    Address, AddressDelegationState, AddressSetCodeStats, BalanceSnapshot, BlacklistEvent,
    BurnEvent, ContractCreation, DepositMintProposal, EmergencyPauseEvent, Erc20Transfer,
    Erc721Transfer, Error, FeeDelegationTxMeta, GasTipEvent, Hash32, InternalTransaction,
    MemberChangeEvent, MinterConfigEvent, MintEvent, NftOwnership, Proposal, ProposalStatus,
    Result, SetCodeAuthorization, Sign, SignedU256, TokenMetadata, ValidatorChangeEvent, Vote,
};

use crate::engine::Engine;

impl Engine {
    pub fn save_contract_creation(&self, record: &ContractCreation) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::contract_creation_key(&record.contract_address),
            &chainidx_codec::json::encode(record)?,
        )?;
        batch.set(
            &chainidx_schema::contract_creator_index_key(
                &record.creator,
                record.block_number,
                &record.contract_address,
            ),
            &[],
        )?;
        batch.set(
            &chainidx_schema::contract_block_index_key(record.block_number, &record.contract_address),
            &[],
        )?;
        batch.commit()
    }

    pub fn save_erc20_transfer(&self, transfer: &Erc20Transfer) -> Result<()> {
        let mut batch = self.store.batch();
        let key = chainidx_schema::erc20_transfer_key(&transfer.tx_hash, transfer.log_index);
        let payload = chainidx_codec::json::encode(transfer)?;
        batch.set(&key, &payload)?;
        for (dim, addr) in [
            (chainidx_schema::Erc20IndexDimension::Token, transfer.contract),
            (chainidx_schema::Erc20IndexDimension::From, transfer.from),
            (chainidx_schema::Erc20IndexDimension::To, transfer.to),
        ] {
            batch.set(
                &chainidx_schema::erc20_index_key(dim, &addr, transfer.block_number, transfer.log_index),
                &key,
            )?;
        }
        batch.commit()
    }

    /// Persists the transfer and updates the current-owner index (§3.2
    /// `NFTOwnership`). Uniqueness is maintained by first reading the prior
    /// owner (if any) and removing its index entry in the same batch as
    /// writing the new one, so a concurrent reader never observes two
    /// owners for the same token.
    pub fn save_erc721_transfer(&self, transfer: &Erc721Transfer) -> Result<()> {
        let token_id = transfer.token_id.to_string();
        let prior_owner = self.erc721_owner(&transfer.contract, &transfer.token_id)?;

        let mut batch = self.store.batch();
        let key = chainidx_schema::erc721_transfer_key(&transfer.tx_hash, transfer.log_index);
        batch.set(&key, &chainidx_codec::json::encode(transfer)?)?;

        if let Some(prior) = prior_owner {
            if prior.owner != transfer.from {
                tracing::warn!(
                    contract = %transfer.contract,
                    token_id = %transfer.token_id,
                    "erc721 transfer `from` does not match recorded owner"
                );
            }
            batch.delete(&chainidx_schema::erc721_owner_index_key(
                &prior.owner,
                &transfer.contract,
                &token_id,
            ))?;
        }

        if chainidx_types::transfer::is_zero_address(&transfer.to) {
            batch.delete(&chainidx_schema::erc721_token_owner_key(&transfer.contract, &token_id))?;
        } else {
            let ownership = NftOwnership {
                contract: transfer.contract,
                token_id: transfer.token_id,
                owner: transfer.to,
            };
            batch.set(
                &chainidx_schema::erc721_token_owner_key(&transfer.contract, &token_id),
                &chainidx_codec::json::encode(&ownership)?,
            )?;
            batch.set(
                &chainidx_schema::erc721_owner_index_key(&transfer.to, &transfer.contract, &token_id),
                &[],
            )?;
        }
        batch.commit()
    }

    pub fn erc721_owner(&self, contract: &chainidx_types::Address, token_id: &U256) -> Result<Option<NftOwnership>> {
        let key = chainidx_schema::erc721_token_owner_key(contract, &token_id.to_string());
        match self.store.get(&key)? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn save_internal_transaction(&self, itx: &InternalTransaction) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::internal_tx_key(&itx.tx_hash, itx.index),
            &chainidx_codec::json::encode(itx)?,
        )?;
        batch.set(
            &chainidx_schema::internal_tx_index_key(
                chainidx_schema::AddressRole::From,
                &itx.from,
                itx.block_number,
                &itx.tx_hash,
            ),
            &[],
        )?;
        if let Some(to) = itx.to {
            batch.set(
                &chainidx_schema::internal_tx_index_key(
                    chainidx_schema::AddressRole::To,
                    &to,
                    itx.block_number,
                    &itx.tx_hash,
                ),
                &[],
            )?;
        }
        batch.commit()
    }

    /// §4.4.4 setcode delegation state machine: persists the authorization
    /// record, its three block/target/authority indexes, and rolls the
    /// authority's aggregate stats and current delegation state forward.
    pub fn save_setcode_authorization(&self, auth: &SetCodeAuthorization) -> Result<()> {
        let mut stats = self
            .address_setcode_stats(&auth.authority)?
            .unwrap_or_default();
        stats.authorizations_granted += 1;
        if auth.applied {
            stats.authorizations_applied += 1;
        }
        let delegation = AddressDelegationState {
            has_delegation: auth.applied,
            target: auth.applied.then_some(auth.target),
            block_number: auth.block_number,
            updated_at: auth.block_number,
        };

        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::setcode_auth_key(&auth.tx_hash, auth.auth_index),
            &chainidx_codec::json::encode(auth)?,
        )?;
        batch.set(
            &chainidx_schema::setcode_target_index_key(&auth.target, auth.block_number, &auth.tx_hash, auth.auth_index),
            &[],
        )?;
        batch.set(
            &chainidx_schema::setcode_authority_index_key(&auth.authority, auth.block_number, &auth.tx_hash, auth.auth_index),
            &[],
        )?;
        batch.set(
            &chainidx_schema::setcode_block_index_key(auth.block_number, &auth.tx_hash, auth.auth_index),
            &[],
        )?;
        batch.set(
            &chainidx_schema::setcode_stats_key(&auth.authority),
            &chainidx_codec::json::encode(&stats)?,
        )?;
        batch.set(
            &chainidx_schema::setcode_delegation_state_key(&auth.authority),
            &chainidx_codec::json::encode(&delegation)?,
        )?;
        batch.commit()
    }

    pub fn address_setcode_stats(&self, addr: &chainidx_types::Address) -> Result<Option<AddressSetCodeStats>> {
        match self.store.get(&chainidx_schema::setcode_stats_key(addr))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn address_delegation_state(&self, addr: &chainidx_types::Address) -> Result<Option<AddressDelegationState>> {
        match self.store.get(&chainidx_schema::setcode_delegation_state_key(addr))? {
            Some(bytes) => Ok(Some(chainidx_codec::json::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// §4.4.2 "Token metadata update": an existing record under the same
    /// `address` with a different `name`/`symbol` has its old name/symbol
    /// index entries deleted before the new ones are written, so a stale
    /// index never outlives the record it points at.
    pub fn save_token_metadata(&self, meta: &TokenMetadata) -> Result<()> {
        let previous: Option<TokenMetadata> = match self.store.get(&chainidx_schema::token_metadata_key(&meta.address))? {
            Some(bytes) => Some(chainidx_codec::json::decode(&bytes)?),
            None => None,
        };

        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::token_metadata_key(&meta.address),
            &chainidx_codec::json::encode(meta)?,
        )?;
        if let Some(previous) = &previous {
            if previous.standard != meta.standard {
                batch.delete(&chainidx_schema::token_standard_index_key(previous.standard, &meta.address))?;
            }
            if previous.name != meta.name && !previous.name.is_empty() {
                batch.delete(&chainidx_schema::token_name_index_key(&previous.name, &meta.address))?;
            }
            if previous.symbol != meta.symbol && !previous.symbol.is_empty() {
                batch.delete(&chainidx_schema::token_symbol_index_key(&previous.symbol, &meta.address))?;
            }
        }
        batch.set(
            &chainidx_schema::token_standard_index_key(meta.standard, &meta.address),
            &[],
        )?;
        if !meta.name.is_empty() {
            batch.set(&chainidx_schema::token_name_index_key(&meta.name, &meta.address), &[])?;
        }
        if !meta.symbol.is_empty() {
            batch.set(
                &chainidx_schema::token_symbol_index_key(&meta.symbol, &meta.address),
                &[],
            )?;
        }
        batch.commit()
    }

    /// Appends a balance snapshot and overwrites the latest-balance cache.
    /// Callers must append in ascending `block_number` order per address
    /// (§9); the sequence only orders writes, it does not itself enforce
    /// monotonic block numbers.
    pub fn save_balance_snapshot(&self, snapshot: &BalanceSnapshot) -> Result<()> {
        let seq = self.address_balance_sequences.next_seq(&snapshot.address);
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::address_balance_key(&snapshot.address, seq),
            &chainidx_codec::json::encode(snapshot)?,
        )?;
        batch.set(
            &chainidx_schema::address_balance_latest_key(&snapshot.address),
            &chainidx_codec::json::encode(snapshot)?,
        )?;
        batch.commit()
    }

    /// §4.4.2 `UpdateBalance`: reads the latest balance, applies `delta`,
    /// and appends the result as a new snapshot. A result that would go
    /// negative is rejected as `InvalidData` and nothing is written.
    pub fn update_balance(&self, addr: &Address, block_number: u64, delta: SignedU256, tx_hash: Hash32) -> Result<BalanceSnapshot> {
        let current = self
            .get_address_balance_latest(addr)?
            .map(|s| s.balance)
            .unwrap_or(U256::ZERO);
        let new_signed = SignedU256::from(current)
            .checked_add(&delta)
            .ok_or_else(|| Error::invalid_data(format!("balance update overflowed for {addr}")))?;
        if new_signed.is_negative() {
            return Err(Error::invalid_data(format!(
                "balance update would go negative for {addr}: current {current}, delta {delta}"
            )));
        }
        let snapshot = BalanceSnapshot {
            address: *addr,
            block_number,
            balance: new_signed.magnitude,
            delta,
            tx_hash,
        };
        self.save_balance_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    /// §4.4.2 `SetBalance`: implemented as `UpdateBalance` with
    /// `delta = target - current`.
    pub fn set_balance(&self, addr: &Address, block_number: u64, target: U256, tx_hash: Hash32) -> Result<BalanceSnapshot> {
        let current = self
            .get_address_balance_latest(addr)?
            .map(|s| s.balance)
            .unwrap_or(U256::ZERO);
        let delta = SignedU256::from(target)
            .checked_add(&SignedU256::from_magnitude(current, Sign::Negative))
            .ok_or_else(|| Error::invalid_data(format!("set_balance overflowed for {addr}")))?;
        self.update_balance(addr, block_number, delta, tx_hash)
    }

    /// §4.4.4 proposal lifecycle: moves the status-index pointer whenever
    /// an already-stored proposal's status changes.
    pub fn save_proposal(&self, proposal: &Proposal) -> Result<()> {
        let previous: Option<Proposal> = match self
            .store
            .get(&chainidx_schema::sys_proposal_key(&proposal.contract, proposal.id))?
        {
            Some(bytes) => Some(chainidx_codec::json::decode(&bytes)?),
            None => None,
        };

        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::sys_proposal_key(&proposal.contract, proposal.id),
            &chainidx_codec::json::encode(proposal)?,
        )?;
        if let Some(previous) = previous {
            if previous.status != proposal.status {
                batch.delete(&chainidx_schema::proposal_status_index_key(
                    &proposal.contract,
                    previous.status,
                    proposal.id,
                ))?;
            }
        }
        batch.set(
            &chainidx_schema::proposal_status_index_key(&proposal.contract, proposal.status, proposal.id),
            &[],
        )?;
        batch.commit()
    }

    pub fn save_vote(&self, vote: &Vote) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_vote_key(&vote.contract, vote.proposal_id, &vote.voter),
            &chainidx_codec::json::encode(vote)?,
        )
    }

    pub fn save_mint_event(&self, event: &MintEvent) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_mint_key(&event.contract, event.block_number, event.log_index),
            &chainidx_codec::json::encode(event)?,
        )
    }

    pub fn save_burn_event(&self, event: &BurnEvent) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_burn_key(&event.contract, event.block_number, event.log_index),
            &chainidx_codec::json::encode(event)?,
        )
    }

    pub fn save_minter_config_event(&self, event: &MinterConfigEvent) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::sys_minter_config_key(&event.contract, event.block_number, &event.tx_hash),
            &chainidx_codec::json::encode(event)?,
        )?;
        if event.allowance.is_zero() {
            batch.delete(&chainidx_schema::active_minter_key(&event.contract, &event.minter))?;
        } else {
            batch.set(&chainidx_schema::active_minter_key(&event.contract, &event.minter), &chainidx_codec::encode_marker())?;
        }
        batch.commit()
    }

    pub fn save_validator_change_event(&self, event: &ValidatorChangeEvent) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::sys_validator_change_key(&event.contract, event.block_number, &event.validator),
            &chainidx_codec::json::encode(event)?,
        )?;
        if event.added {
            batch.set(
                &chainidx_schema::active_validator_key(&event.contract, &event.validator),
                &chainidx_codec::encode_marker(),
            )?;
        } else {
            batch.delete(&chainidx_schema::active_validator_key(&event.contract, &event.validator))?;
        }
        batch.commit()
    }

    pub fn save_gas_tip_event(&self, event: &GasTipEvent) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_gas_tip_key(&event.contract, event.block_number),
            &chainidx_codec::json::encode(event)?,
        )
    }

    pub fn save_blacklist_event(&self, event: &BlacklistEvent) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::sys_blacklist_event_key(&event.contract, event.block_number, &event.address),
            &chainidx_codec::json::encode(event)?,
        )?;
        if event.blacklisted {
            batch.set(
                &chainidx_schema::blacklist_marker_key(&event.contract, &event.address),
                &chainidx_codec::encode_marker(),
            )?;
        } else {
            batch.delete(&chainidx_schema::blacklist_marker_key(&event.contract, &event.address))?;
        }
        batch.commit()
    }

    pub fn save_member_change_event(&self, event: &MemberChangeEvent) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_member_change_key(&event.contract, event.block_number, &event.member),
            &chainidx_codec::json::encode(event)?,
        )
    }

    pub fn save_emergency_pause_event(&self, event: &EmergencyPauseEvent) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_emergency_pause_key(&event.contract, event.block_number),
            &chainidx_codec::json::encode(event)?,
        )
    }

    pub fn save_deposit_mint_proposal(&self, proposal: &DepositMintProposal) -> Result<()> {
        self.store.put(
            &chainidx_schema::sys_deposit_mint_proposal_key(&proposal.contract, proposal.id),
            &chainidx_codec::json::encode(proposal)?,
        )
    }

    pub fn save_fee_delegation_meta(&self, meta: &FeeDelegationTxMeta) -> Result<()> {
        let mut batch = self.store.batch();
        batch.set(
            &chainidx_schema::fee_delegation_meta_key(&meta.tx_hash),
            &chainidx_codec::json::encode(meta)?,
        )?;
        if let Some(payer) = meta.fee_payer {
            batch.set(
                &chainidx_schema::fee_delegation_payer_index_key(&payer, meta.block_number, &meta.tx_hash),
                &[],
            )?;
        }
        batch.commit()
    }

    pub fn is_blacklisted(&self, contract: &chainidx_types::Address, address: &chainidx_types::Address) -> Result<bool> {
        self.store.has(&chainidx_schema::blacklist_marker_key(contract, address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use chainidx_types::TokenStandard;

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    #[test]
    fn update_balance_accumulates_from_zero() {
        let (_dir, engine) = open_engine();
        let addr = address!("0000000000000000000000000000000000001111");
        let tx = b256!("003333333333333333333333333333333333333333333333333333333333333c");

        let snapshot = engine
            .update_balance(&addr, 1, SignedU256::from(U256::from(100u64)), tx)
            .unwrap();
        assert_eq!(snapshot.balance, U256::from(100u64));

        let snapshot = engine
            .update_balance(&addr, 2, SignedU256::from_magnitude(U256::from(40u64), chainidx_types::Sign::Negative), tx)
            .unwrap();
        assert_eq!(snapshot.balance, U256::from(60u64));
        assert_eq!(engine.get_address_balance_latest(&addr).unwrap().unwrap().balance, U256::from(60u64));
    }

    #[test]
    fn update_balance_rejects_negative_result() {
        let (_dir, engine) = open_engine();
        let addr = address!("0000000000000000000000000000000000002222");
        let tx = b256!("004444444444444444444444444444444444444444444444444444444444444d");

        engine.update_balance(&addr, 1, SignedU256::from(U256::from(10u64)), tx).unwrap();
        let err = engine
            .update_balance(&addr, 2, SignedU256::from_magnitude(U256::from(20u64), chainidx_types::Sign::Negative), tx)
            .unwrap_err();
        assert!(matches!(err, chainidx_types::Error::InvalidData(_)));
        assert_eq!(engine.get_address_balance_latest(&addr).unwrap().unwrap().balance, U256::from(10u64));
    }

    #[test]
    fn set_balance_writes_target_as_new_latest() {
        let (_dir, engine) = open_engine();
        let addr = address!("0000000000000000000000000000000000003333");
        let tx = b256!("005555555555555555555555555555555555555555555555555555555555555e");

        engine.update_balance(&addr, 1, SignedU256::from(U256::from(10u64)), tx).unwrap();
        let snapshot = engine.set_balance(&addr, 2, U256::from(77u64), tx).unwrap();
        assert_eq!(snapshot.balance, U256::from(77u64));
        assert_eq!(snapshot.delta.magnitude, U256::from(67u64));
    }

    #[test]
    fn erc721_transfer_chain_mint_transfer_burn_keeps_one_owner() {
        let (_dir, engine) = open_engine();
        let contract = address!("00000000000000000000000000000000000000aa");
        let minter_zero = chainidx_types::Address::ZERO;
        let holder_a = address!("00000000000000000000000000000000000000bb");
        let holder_b = address!("00000000000000000000000000000000000000cc");
        let token_id = U256::from(42u64);
        let tx = b256!("001111111111111111111111111111111111111111111111111111111111111a");

        engine
            .save_erc721_transfer(&Erc721Transfer {
                contract,
                from: minter_zero,
                to: holder_a,
                token_id,
                tx_hash: tx,
                block_number: 1,
                log_index: 0,
                timestamp: 100,
            })
            .unwrap();
        assert_eq!(engine.erc721_owner(&contract, &token_id).unwrap().unwrap().owner, holder_a);

        engine
            .save_erc721_transfer(&Erc721Transfer {
                contract,
                from: holder_a,
                to: holder_b,
                token_id,
                tx_hash: tx,
                block_number: 2,
                log_index: 0,
                timestamp: 200,
            })
            .unwrap();
        assert_eq!(engine.erc721_owner(&contract, &token_id).unwrap().unwrap().owner, holder_b);
        assert!(engine
            .store()
            .get(&chainidx_schema::erc721_owner_index_key(&holder_a, &contract, "42"))
            .unwrap()
            .is_none());

        engine
            .save_erc721_transfer(&Erc721Transfer {
                contract,
                from: holder_b,
                to: minter_zero,
                token_id,
                tx_hash: tx,
                block_number: 3,
                log_index: 0,
                timestamp: 300,
            })
            .unwrap();
        assert!(engine.erc721_owner(&contract, &token_id).unwrap().is_none());
    }

    #[test]
    fn setcode_authorization_rolls_up_stats() {
        let (_dir, engine) = open_engine();
        let authority = address!("00000000000000000000000000000000000000dd");
        let target = address!("00000000000000000000000000000000000000ee");
        let tx = b256!("002222222222222222222222222222222222222222222222222222222222222b");

        engine
            .save_setcode_authorization(&SetCodeAuthorization {
                tx_hash: tx,
                auth_index: 0,
                block_number: 5,
                tx_index: 0,
                target,
                authority,
                applied: true,
            })
            .unwrap();

        let stats = engine.address_setcode_stats(&authority).unwrap().unwrap();
        assert_eq!(stats.authorizations_granted, 1);
        assert_eq!(stats.authorizations_applied, 1);
        let delegation = engine.address_delegation_state(&authority).unwrap().unwrap();
        assert!(delegation.has_delegation);
        assert_eq!(delegation.target, Some(target));
    }

    #[test]
    fn proposal_status_transition_moves_index_pointer() {
        let (_dir, engine) = open_engine();
        let contract = address!("00000000000000000000000000000000000000ff");
        let proposer = address!("000000000000000000000000000000000000aabb");

        engine
            .save_proposal(&Proposal {
                contract,
                id: 1,
                proposer,
                status: ProposalStatus::Voting,
                created_at_block: 1,
                created_at: 100,
                executed_at: None,
                description: "test".into(),
            })
            .unwrap();
        assert!(engine
            .store()
            .get(&chainidx_schema::proposal_status_index_key(&contract, ProposalStatus::Voting, 1))
            .unwrap()
            .is_some());

        engine
            .save_proposal(&Proposal {
                contract,
                id: 1,
                proposer,
                status: ProposalStatus::Executed,
                created_at_block: 1,
                created_at: 100,
                executed_at: Some(10),
                description: "test".into(),
            })
            .unwrap();
        assert!(engine
            .store()
            .get(&chainidx_schema::proposal_status_index_key(&contract, ProposalStatus::Voting, 1))
            .unwrap()
            .is_none());
        assert!(engine
            .store()
            .get(&chainidx_schema::proposal_status_index_key(&contract, ProposalStatus::Executed, 1))
            .unwrap()
            .is_some());
    }

    #[test]
    fn token_metadata_is_indexed_by_standard() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000aabb");
        engine
            .save_token_metadata(&TokenMetadata {
                address: addr,
                standard: TokenStandard::Erc20,
                name: "Test".into(),
                symbol: "TST".into(),
                decimals: Some(18),
                total_supply: None,
                base_uri: None,
                supports_enumerable: false,
                supports_metadata: true,
                detected_at: 1,
                created_at: 1,
                updated_at: 1,
            })
            .unwrap();
        assert!(engine
            .store()
            .get(&chainidx_schema::token_standard_index_key(TokenStandard::Erc20, &addr))
            .unwrap()
            .is_some());
    }

    #[test]
    fn token_metadata_update_drops_stale_name_index() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000aacc");
        let base = TokenMetadata {
            address: addr,
            standard: TokenStandard::Erc20,
            name: "Old".into(),
            symbol: "OLD".into(),
            decimals: Some(18),
            total_supply: None,
            base_uri: None,
            supports_enumerable: false,
            supports_metadata: true,
            detected_at: 1,
            created_at: 1,
            updated_at: 1,
        };
        engine.save_token_metadata(&base).unwrap();
        assert!(engine
            .store()
            .get(&chainidx_schema::token_name_index_key("Old", &addr))
            .unwrap()
            .is_some());

        engine
            .save_token_metadata(&TokenMetadata {
                name: "New".into(),
                symbol: "NEW".into(),
                updated_at: 2,
                ..base
            })
            .unwrap();
        assert!(engine
            .store()
            .get(&chainidx_schema::token_name_index_key("Old", &addr))
            .unwrap()
            .is_none());
        assert!(engine
            .store()
            .get(&chainidx_schema::token_name_index_key("New", &addr))
            .unwrap()
            .is_some());
    }
}
