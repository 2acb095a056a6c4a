//! Write Path, `IngestBlock` (§4.4.1): the one atomic operation that
//! persists a block together with its transactions and receipts and
//! advances the chain-tip counters. Everything else derived from a block
//! (transfers, contract creations, traces, ...) is supplied by the caller
//! as separately decoded records through the writers in [`crate::derived`];
//! this engine has no EVM/ABI awareness of its own.

use std::sync::atomic::Ordering;

use chainidx_types::{Block, Error, Hash32, Receipt, Result, Transaction, TxLocation};
use rustc_hash::FxHashMap;

use crate::engine::Engine;

pub struct IngestBlockRequest {
    pub block: Block,
    pub transactions: Vec<Transaction>,
    pub receipts: Vec<Receipt>,
}

impl Engine {
    /// §4.4.1: at most one receipt per transaction is expected; extras are
    /// ignored and a missing receipt is tolerated (the block is still
    /// stored, a later `GetReceipt` for that tx returns `NotFound`).
    pub fn ingest_block(&self, req: IngestBlockRequest) -> Result<()> {
        let IngestBlockRequest {
            block,
            transactions,
            receipts,
        } = req;

        if transactions.len() != block.transactions.len() {
            return Err(Error::invalid_data(format!(
                "block {} declares {} transaction hashes but {} transactions were supplied",
                block.number,
                block.transactions.len(),
                transactions.len()
            )));
        }
        for (tx, expected_hash) in transactions.iter().zip(block.transactions.iter()) {
            if tx.hash != *expected_hash {
                return Err(Error::invalid_data(format!(
                    "transaction hash mismatch in block {}: block lists {expected_hash}, supplied tx has {}",
                    block.number, tx.hash
                )));
            }
        }

        // Step 1: build the receipt map keyed by tx-hash for O(1) lookup.
        let receipt_by_hash: FxHashMap<Hash32, &Receipt> =
            receipts.iter().map(|r| (r.tx_hash, r)).collect();
        for tx in &transactions {
            if let Some(receipt) = receipt_by_hash.get(&tx.hash) {
                receipt.validate().map_err(Error::invalid_data)?;
            }
        }

        let mut batch = self.store.batch();

        batch.set(&chainidx_schema::block_key(block.number), &chainidx_codec::encode_block(&block))?;
        batch.set(
            &chainidx_schema::block_hash_index_key(&block.hash),
            &chainidx_codec::encode_u64(block.number),
        )?;
        batch.set(
            &chainidx_schema::block_timestamp_key(block.timestamp, block.number),
            &chainidx_codec::encode_u64(block.number),
        )?;

        for (idx, tx) in transactions.iter().enumerate() {
            let idx = idx as u32;
            batch.set(
                &chainidx_schema::tx_key(block.number, idx),
                &chainidx_codec::encode_transaction(tx),
            )?;

            let location = TxLocation {
                block_height: block.number,
                tx_index: idx,
                block_hash: block.hash,
            };
            batch.set(
                &chainidx_schema::tx_hash_index_key(&tx.hash),
                &chainidx_codec::json::encode(&location)?,
            )?;

            let from_seq = self.address_tx_sequences.next_seq(&tx.from);
            batch.set(&chainidx_schema::address_tx_key(&tx.from, from_seq), tx.hash.as_slice())?;
            if let Some(to) = tx.to {
                if to != tx.from {
                    let to_seq = self.address_tx_sequences.next_seq(&to);
                    batch.set(&chainidx_schema::address_tx_key(&to, to_seq), tx.hash.as_slice())?;
                }
            }
        }

        for tx in &transactions {
            let Some(receipt) = receipt_by_hash.get(&tx.hash) else {
                continue;
            };
            batch.set(
                &chainidx_schema::receipt_key(&receipt.tx_hash),
                &chainidx_codec::encode_receipt(receipt),
            )?;
            if let Some(contract_address) = receipt.contract_address {
                if !contract_address.is_zero() {
                    batch.set(
                        &chainidx_schema::contract_address_key(&receipt.tx_hash),
                        contract_address.as_slice(),
                    )?;
                }
            }
        }

        let new_tx_count = self.transaction_count.load(Ordering::SeqCst) + transactions.len() as u64;
        batch.set(&chainidx_schema::latest_height_key(), &chainidx_codec::encode_u64(block.number))?;
        batch.set(&chainidx_schema::transaction_count_key(), &chainidx_codec::encode_u64(new_tx_count))?;

        batch.sync().commit()?;

        self.latest_height.store(block.number, Ordering::SeqCst);
        self.has_latest_height.store(true, Ordering::SeqCst);
        self.transaction_count.store(new_tx_count, Ordering::SeqCst);

        tracing::info!(
            height = block.number,
            tx_count = transactions.len(),
            "ingested block"
        );
        Ok(())
    }

    /// Best-effort removal of a block's primary records (§9 Non-goals:
    /// derived records already written from this block's logs are left in
    /// place — this engine cannot reverse decoded-log side effects it
    /// never computed itself). Intended for discarding an uncommitted
    /// tip during a shallow reorg, not general history editing.
    pub fn delete_block(&self, height: u64) -> Result<()> {
        let Some(bytes) = self.store.get(&chainidx_schema::block_key(height))? else {
            return Ok(());
        };
        let block = chainidx_codec::decode_block(&bytes)?;

        let mut batch = self.store.batch();
        batch.delete(&chainidx_schema::block_key(height))?;
        batch.delete(&chainidx_schema::block_hash_index_key(&block.hash))?;
        batch.delete(&chainidx_schema::block_timestamp_key(block.timestamp, height))?;
        for (idx, tx_hash) in block.transactions.iter().enumerate() {
            batch.delete(&chainidx_schema::tx_key(height, idx as u32))?;
            batch.delete(&chainidx_schema::tx_hash_index_key(tx_hash))?;
            batch.delete(&chainidx_schema::receipt_key(tx_hash))?;
            batch.delete(&chainidx_schema::contract_address_key(tx_hash))?;
        }
        batch.commit()?;

        tracing::warn!(height, "deleted block (derived records not reversed)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, U256};
    use chainidx_types::{Log, TransactionType};

    fn sample_request() -> IngestBlockRequest {
        let tx_hash = b256!("001111111111111111111111111111111111111111111111111111111111111a");
        let block = Block {
            number: 1,
            hash: b256!("002222222222222222222222222222222222222222222222222222222222222b"),
            parent_hash: b256!("0000000000000000000000000000000000000000000000000000000000000000"),
            timestamp: 1_700_000_000,
            miner: address!("00000000000000000000000000000000000000aa"),
            gas_limit: 30_000_000,
            gas_used: 21_000,
            transactions: vec![tx_hash],
        };
        let tx = chainidx_types::Transaction {
            hash: tx_hash,
            tx_type: TransactionType::Legacy,
            from: address!("00000000000000000000000000000000000000bb"),
            to: Some(address!("00000000000000000000000000000000000000cc")),
            value: U256::from(1u64),
            gas_price: U256::from(1_000_000_000u64),
            gas_tip_cap: None,
            gas_fee_cap: None,
            gas_limit: 21_000,
            nonce: 0,
            input: vec![],
        };
        let receipt = chainidx_types::Receipt {
            tx_hash,
            status: 1,
            cumulative_gas_used: 21_000,
            gas_used: 21_000,
            logs: Vec::<Log>::new(),
            contract_address: None,
            effective_gas_price: U256::from(1_000_000_000u64),
        };
        IngestBlockRequest {
            block,
            transactions: vec![tx],
            receipts: vec![receipt],
        }
    }

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    #[test]
    fn ingest_block_advances_tip_and_persists_everything() {
        let (_dir, engine) = open_engine();
        engine.ingest_block(sample_request()).unwrap();

        assert_eq!(engine.latest_height(), Some(1));
        assert_eq!(engine.transaction_count(), 1);

        let stored = engine
            .store()
            .get(&chainidx_schema::block_key(1))
            .unwrap()
            .unwrap();
        assert_eq!(chainidx_codec::decode_block(&stored).unwrap().number, 1);
    }

    #[test]
    fn ingest_block_rejects_receipt_with_bad_status() {
        let (_dir, engine) = open_engine();
        let mut req = sample_request();
        req.receipts[0].status = 2;
        assert!(engine.ingest_block(req).is_err());
        assert_eq!(engine.latest_height(), None);
    }

    #[test]
    fn ingest_block_rejects_tx_count_mismatch() {
        let (_dir, engine) = open_engine();
        let mut req = sample_request();
        req.transactions.clear();
        assert!(engine.ingest_block(req).is_err());
    }

    #[test]
    fn zero_address_contract_address_is_not_indexed() {
        let (_dir, engine) = open_engine();
        let mut req = sample_request();
        req.receipts[0].contract_address = Some(chainidx_types::Address::ZERO);
        engine.ingest_block(req).unwrap();
        let tx_hash = b256!("001111111111111111111111111111111111111111111111111111111111111a");
        assert!(engine.get_contract_address(&tx_hash).unwrap().is_none());
    }

    #[test]
    fn delete_block_removes_primary_records() {
        let (_dir, engine) = open_engine();
        engine.ingest_block(sample_request()).unwrap();
        engine.delete_block(1).unwrap();
        assert!(engine.store().get(&chainidx_schema::block_key(1)).unwrap().is_none());
    }

    #[test]
    fn delete_block_is_idempotent_on_absent_height() {
        let (_dir, engine) = open_engine();
        engine.delete_block(42).unwrap();
        engine.delete_block(42).unwrap();
    }

    #[test]
    fn missing_receipt_is_tolerated_and_block_is_still_stored() {
        let (_dir, engine) = open_engine();
        let mut req = sample_request();
        req.receipts.clear();
        engine.ingest_block(req).unwrap();

        assert_eq!(engine.latest_height(), Some(1));
        let tx_hash = b256!("001111111111111111111111111111111111111111111111111111111111111a");
        assert!(engine.get_receipt(&tx_hash).unwrap().is_none());
    }

    #[test]
    fn extra_receipt_with_unknown_tx_hash_is_ignored() {
        let (_dir, engine) = open_engine();
        let mut req = sample_request();
        let mut extra = req.receipts[0].clone();
        extra.tx_hash = b256!("009999999999999999999999999999999999999999999999999999999999999f");
        req.receipts.push(extra);
        engine.ingest_block(req).unwrap();
        assert_eq!(engine.latest_height(), Some(1));
    }
}
