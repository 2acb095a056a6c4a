//! Aggregate queries (§4.5.3). Each one walks `[from_block, to_block]`,
//! loading every block and its transactions/receipts, reducing into a map
//! keyed by the relevant dimension (address, miner, fee-payer), then sorts
//! and truncates to `limit`. Missing blocks are skipped, not fatal — a gap
//! in the ledger (e.g. from `delete_block`) should not fail a range scan.

use std::collections::HashMap;

use alloy_primitives::U256;
use chainidx_types::{
    Address, AddressGasUsage, Error, FeeDelegationStats, FeePayerStats, FeePayerTxCount,
    GasStats, MinerBlockCount, NetworkMetrics, Result,
};

use crate::engine::Engine;

fn check_range(from_block: u64, to_block: u64) -> Result<()> {
    if from_block > to_block {
        return Err(Error::invalid_data(format!(
            "fromBlock {from_block} > toBlock {to_block}"
        )));
    }
    Ok(())
}

impl Engine {
    pub fn gas_stats_by_block_range(&self, from_block: u64, to_block: u64) -> Result<GasStats> {
        check_range(from_block, to_block)?;
        let mut stats = GasStats::default();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                let Some(receipt) = self.get_receipt(tx_hash)? else { continue };
                let Some(tx) = self.get_transaction(tx_hash)? else { continue };
                stats.tx_count += 1;
                stats.total_gas_used += receipt.gas_used;
                stats.total_gas_cost += U256::from(receipt.gas_used) * tx.gas_price;
            }
        }
        Ok(stats)
    }

    pub fn gas_stats_by_address(&self, addr: &Address, from_block: u64, to_block: u64) -> Result<GasStats> {
        check_range(from_block, to_block)?;
        let mut stats = GasStats::default();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                let Some(tx) = self.get_transaction(tx_hash)? else { continue };
                if tx.from != *addr {
                    continue;
                }
                let Some(receipt) = self.get_receipt(tx_hash)? else { continue };
                stats.tx_count += 1;
                stats.total_gas_used += receipt.gas_used;
                stats.total_gas_cost += U256::from(receipt.gas_used) * tx.gas_price;
            }
        }
        Ok(stats)
    }

    pub fn top_addresses_by_gas_used(&self, from_block: u64, to_block: u64, limit: usize) -> Result<Vec<AddressGasUsage>> {
        let by_addr = self.accumulate_address_usage(from_block, to_block)?;
        let mut out: Vec<AddressGasUsage> = by_addr.into_values().collect();
        out.sort_by(|a, b| b.gas_used.cmp(&a.gas_used));
        out.truncate(limit);
        Ok(out)
    }

    pub fn top_addresses_by_tx_count(&self, from_block: u64, to_block: u64, limit: usize) -> Result<Vec<AddressGasUsage>> {
        let by_addr = self.accumulate_address_usage(from_block, to_block)?;
        let mut out: Vec<AddressGasUsage> = by_addr.into_values().collect();
        out.sort_by(|a, b| b.tx_count.cmp(&a.tx_count));
        out.truncate(limit);
        Ok(out)
    }

    fn accumulate_address_usage(&self, from_block: u64, to_block: u64) -> Result<HashMap<Address, AddressGasUsage>> {
        check_range(from_block, to_block)?;
        let mut by_addr: HashMap<Address, AddressGasUsage> = HashMap::new();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                let Some(tx) = self.get_transaction(tx_hash)? else { continue };
                let Some(receipt) = self.get_receipt(tx_hash)? else { continue };
                let entry = by_addr.entry(tx.from).or_insert_with(|| AddressGasUsage {
                    address: tx.from,
                    gas_used: 0,
                    tx_count: 0,
                });
                entry.gas_used += receipt.gas_used;
                entry.tx_count += 1;
            }
        }
        Ok(by_addr)
    }

    pub fn network_metrics(&self, from_block: u64, to_block: u64) -> Result<NetworkMetrics> {
        check_range(from_block, to_block)?;
        let mut metrics = NetworkMetrics::default();
        let mut total_gas_price = U256::ZERO;
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            metrics.block_count += 1;
            for tx_hash in &block.transactions {
                let Some(receipt) = self.get_receipt(tx_hash)? else { continue };
                let Some(tx) = self.get_transaction(tx_hash)? else { continue };
                metrics.tx_count += 1;
                metrics.total_gas_used += receipt.gas_used;
                total_gas_price += tx.gas_price;
            }
        }
        metrics.avg_gas_price = if metrics.tx_count == 0 {
            U256::ZERO
        } else {
            total_gas_price / U256::from(metrics.tx_count)
        };
        Ok(metrics)
    }

    pub fn top_miners(&self, from_block: u64, to_block: u64, limit: usize) -> Result<Vec<MinerBlockCount>> {
        check_range(from_block, to_block)?;
        let mut by_miner: HashMap<Address, u64> = HashMap::new();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            *by_miner.entry(block.miner).or_insert(0) += 1;
        }
        let mut out: Vec<MinerBlockCount> = by_miner
            .into_iter()
            .map(|(miner, block_count)| MinerBlockCount { miner, block_count })
            .collect();
        out.sort_by(|a, b| b.block_count.cmp(&a.block_count));
        out.truncate(limit);
        Ok(out)
    }

    pub fn fee_delegation_stats(&self, from_block: u64, to_block: u64) -> Result<FeeDelegationStats> {
        check_range(from_block, to_block)?;
        let mut stats = FeeDelegationStats::default();
        let mut payers: std::collections::HashSet<Address> = std::collections::HashSet::new();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                if let Some(meta) = self.get_fee_delegation_meta(tx_hash)? {
                    stats.delegated_tx_count += 1;
                    if let Some(payer) = meta.fee_payer {
                        payers.insert(payer);
                    }
                }
            }
        }
        stats.distinct_fee_payers = payers.len() as u64;
        Ok(stats)
    }

    pub fn top_fee_payers(&self, from_block: u64, to_block: u64, limit: usize) -> Result<Vec<FeePayerTxCount>> {
        check_range(from_block, to_block)?;
        let mut by_payer: HashMap<Address, u64> = HashMap::new();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                if let Some(meta) = self.get_fee_delegation_meta(tx_hash)? {
                    if let Some(payer) = meta.fee_payer {
                        *by_payer.entry(payer).or_insert(0) += 1;
                    }
                }
            }
        }
        let mut out: Vec<FeePayerTxCount> = by_payer
            .into_iter()
            .map(|(fee_payer, tx_count)| FeePayerTxCount { fee_payer, tx_count })
            .collect();
        out.sort_by(|a, b| b.tx_count.cmp(&a.tx_count));
        out.truncate(limit);
        Ok(out)
    }

    pub fn fee_payer_stats(&self, payer: &Address, from_block: u64, to_block: u64) -> Result<FeePayerStats> {
        check_range(from_block, to_block)?;
        let mut stats = FeePayerStats::default();
        for height in from_block..=to_block {
            let Some(block) = self.get_block(height)? else { continue };
            for tx_hash in &block.transactions {
                let Some(meta) = self.get_fee_delegation_meta(tx_hash)? else { continue };
                if meta.fee_payer != Some(*payer) {
                    continue;
                }
                let Some(receipt) = self.get_receipt(tx_hash)? else { continue };
                stats.tx_count += 1;
                stats.total_gas_sponsored += receipt.gas_used;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::IngestBlockRequest;
    use alloy_primitives::address;
    use chainidx_types::{Block, FeeDelegationTxMeta, Log, Receipt, Transaction, TransactionType};

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    fn ingest_sample_block(engine: &Engine, height: u64, miner: Address, from: Address, gas_used: u64) {
        let tx_hash = alloy_primitives::B256::repeat_byte(height as u8);
        let block = Block {
            number: height,
            hash: alloy_primitives::B256::repeat_byte((height + 100) as u8),
            parent_hash: alloy_primitives::B256::ZERO,
            timestamp: 1_700_000_000 + height,
            miner,
            gas_limit: 30_000_000,
            gas_used,
            transactions: vec![tx_hash],
        };
        let tx = Transaction {
            hash: tx_hash,
            tx_type: TransactionType::Legacy,
            from,
            to: Some(address!("000000000000000000000000000000000000dead")),
            value: U256::from(1u64),
            gas_price: U256::from(1_000_000_000u64),
            gas_tip_cap: None,
            gas_fee_cap: None,
            gas_limit: gas_used,
            nonce: height,
            input: vec![],
        };
        let receipt = Receipt {
            tx_hash,
            status: 1,
            cumulative_gas_used: gas_used,
            gas_used,
            logs: Vec::<Log>::new(),
            contract_address: None,
            effective_gas_price: U256::from(1_000_000_000u64),
        };
        engine
            .ingest_block(IngestBlockRequest {
                block,
                transactions: vec![tx],
                receipts: vec![receipt],
            })
            .unwrap();
        engine
            .save_fee_delegation_meta(&FeeDelegationTxMeta {
                tx_hash,
                fee_payer: Some(address!("0000000000000000000000000000000000facade")),
                block_number: height,
            })
            .unwrap();
    }

    #[test]
    fn network_metrics_aggregates_range() {
        let (_dir, engine) = open_engine();
        let miner = address!("000000000000000000000000000000000000aaaa");
        let alice = address!("000000000000000000000000000000000000bbbb");
        ingest_sample_block(&engine, 1, miner, alice, 21_000);
        ingest_sample_block(&engine, 2, miner, alice, 42_000);

        let metrics = engine.network_metrics(1, 2).unwrap();
        assert_eq!(metrics.block_count, 2);
        assert_eq!(metrics.tx_count, 2);
        assert_eq!(metrics.total_gas_used, 63_000);
    }

    #[test]
    fn top_miners_sorts_by_block_count_descending() {
        let (_dir, engine) = open_engine();
        let miner_a = address!("000000000000000000000000000000000000aaaa");
        let miner_b = address!("000000000000000000000000000000000000bbbb");
        let someone = address!("000000000000000000000000000000000000cccc");
        ingest_sample_block(&engine, 1, miner_a, someone, 21_000);
        ingest_sample_block(&engine, 2, miner_a, someone, 21_000);
        ingest_sample_block(&engine, 3, miner_b, someone, 21_000);

        let top = engine.top_miners(1, 3, 10).unwrap();
        assert_eq!(top[0].miner, miner_a);
        assert_eq!(top[0].block_count, 2);
    }

    #[test]
    fn gas_range_rejects_inverted_bounds() {
        let (_dir, engine) = open_engine();
        assert!(engine.gas_stats_by_block_range(5, 1).is_err());
    }

    #[test]
    fn fee_delegation_stats_counts_distinct_payers() {
        let (_dir, engine) = open_engine();
        let miner = address!("000000000000000000000000000000000000aaaa");
        let alice = address!("000000000000000000000000000000000000bbbb");
        ingest_sample_block(&engine, 1, miner, alice, 21_000);
        ingest_sample_block(&engine, 2, miner, alice, 21_000);

        let stats = engine.fee_delegation_stats(1, 2).unwrap();
        assert_eq!(stats.delegated_tx_count, 2);
        assert_eq!(stats.distinct_fee_payers, 1);
    }
}
