//! `Search` (§4.5.3): classifies the query string by shape — all-digit
//! block number, 64-hex hash, or 40-hex address — and resolves it with the
//! matching point lookups, returning each hit as a typed [`SearchResult`].

use chainidx_types::{Result, SearchResult, SearchResultType, SearchTypeFilter};

use crate::engine::Engine;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn allowed(filter: &SearchTypeFilter, ty: SearchResultType) -> bool {
    filter.is_empty() || filter.contains(&ty)
}

impl Engine {
    pub fn search(&self, query: &str, type_filter: &SearchTypeFilter, limit: usize) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        let mut results = Vec::new();

        if query.chars().all(|c| c.is_ascii_digit()) && !query.is_empty() {
            if let Ok(height) = query.parse::<u64>() {
                if allowed(type_filter, SearchResultType::Block) {
                    if let Some(block) = self.get_block(height)? {
                        results.push(SearchResult {
                            result_type: SearchResultType::Block,
                            label: format!("Block #{}", block.number),
                            metadata: serde_json::json!({ "hash": block.hash, "tx_count": block.tx_count() }),
                            value: serde_json::to_value(&block).map_err(|e| {
                                chainidx_types::Error::invalid_data(format!("serializing block: {e}"))
                            })?,
                        });
                    }
                }
                results.truncate(limit);
                return Ok(results);
            }
        }

        let bare = strip_hex_prefix(query);
        if is_hex(bare) && bare.len() == 64 {
            if let Ok(bytes) = hex::decode(bare) {
                let hash = chainidx_types::Hash32::from_slice(&bytes);
                if allowed(type_filter, SearchResultType::Block) {
                    if let Some(block) = self.get_block_by_hash(&hash)? {
                        results.push(SearchResult {
                            result_type: SearchResultType::Block,
                            label: format!("Block #{}", block.number),
                            metadata: serde_json::json!({ "hash": block.hash }),
                            value: serde_json::to_value(&block).map_err(|e| {
                                chainidx_types::Error::invalid_data(format!("serializing block: {e}"))
                            })?,
                        });
                    }
                }
                if results.is_empty() && allowed(type_filter, SearchResultType::Transaction) {
                    if let Some(tx) = self.get_transaction(&hash)? {
                        results.push(SearchResult {
                            result_type: SearchResultType::Transaction,
                            label: format!("Transaction {hash}"),
                            metadata: serde_json::json!({ "from": tx.from, "to": tx.to }),
                            value: serde_json::to_value(&tx).map_err(|e| {
                                chainidx_types::Error::invalid_data(format!("serializing transaction: {e}"))
                            })?,
                        });
                    }
                }
            }
            results.truncate(limit);
            return Ok(results);
        }

        if is_hex(bare) && bare.len() == 40 {
            if let Ok(bytes) = hex::decode(bare) {
                let addr = chainidx_types::Address::from_slice(&bytes);
                if allowed(type_filter, SearchResultType::ContractAddress) {
                    if let Some(creation) = self.get_contract_creation(&addr)? {
                        results.push(SearchResult {
                            result_type: SearchResultType::ContractAddress,
                            label: format!("Contract {addr}"),
                            metadata: serde_json::json!({ "creator": creation.creator, "block_number": creation.block_number }),
                            value: serde_json::to_value(&creation).map_err(|e| {
                                chainidx_types::Error::invalid_data(format!("serializing contract creation: {e}"))
                            })?,
                        });
                    }
                }
                if results.is_empty() && allowed(type_filter, SearchResultType::Address) {
                    results.push(SearchResult {
                        result_type: SearchResultType::Address,
                        label: format!("Address {addr}"),
                        metadata: serde_json::json!({}),
                        value: serde_json::to_value(addr).map_err(|e| {
                            chainidx_types::Error::invalid_data(format!("serializing address: {e}"))
                        })?,
                    });
                }
            }
        }

        results.truncate(limit);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::IngestBlockRequest;
    use alloy_primitives::{address, U256};
    use chainidx_types::{Block, ContractCreation, Log, Receipt, Transaction, TransactionType};

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    fn ingest(engine: &Engine) -> (chainidx_types::Hash32, chainidx_types::Hash32) {
        let tx_hash = alloy_primitives::B256::repeat_byte(0x11);
        let block_hash = alloy_primitives::B256::repeat_byte(0x22);
        let block = Block {
            number: 7,
            hash: block_hash,
            parent_hash: alloy_primitives::B256::ZERO,
            timestamp: 1_700_000_000,
            miner: address!("000000000000000000000000000000000000aaaa"),
            gas_limit: 30_000_000,
            gas_used: 21_000,
            transactions: vec![tx_hash],
        };
        let tx = Transaction {
            hash: tx_hash,
            tx_type: TransactionType::Legacy,
            from: address!("000000000000000000000000000000000000bbbb"),
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
            .ingest_block(IngestBlockRequest {
                block,
                transactions: vec![tx],
                receipts: vec![receipt],
            })
            .unwrap();
        (tx_hash, block_hash)
    }

    #[test]
    fn search_by_block_number() {
        let (_dir, engine) = open_engine();
        ingest(&engine);
        let results = engine.search("7", &Default::default(), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_type, SearchResultType::Block);
    }

    #[test]
    fn search_by_tx_hash() {
        let (_dir, engine) = open_engine();
        let (tx_hash, _) = ingest(&engine);
        let results = engine.search(&tx_hash.to_string(), &Default::default(), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_type, SearchResultType::Transaction);
    }

    #[test]
    fn search_by_contract_address_prefers_contract_type() {
        let (_dir, engine) = open_engine();
        let contract = address!("0000000000000000000000000000000000beef01");
        engine
            .save_contract_creation(&ContractCreation {
                contract_address: contract,
                creator: address!("000000000000000000000000000000000000cafe"),
                tx_hash: alloy_primitives::B256::repeat_byte(0x33),
                block_number: 1,
                timestamp: 100,
                bytecode_size: 128,
            })
            .unwrap();
        let results = engine.search(&contract.to_string(), &Default::default(), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_type, SearchResultType::ContractAddress);
    }

    #[test]
    fn search_by_plain_address_falls_back_to_address_type() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000dead");
        let results = engine.search(&addr.to_string(), &Default::default(), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_type, SearchResultType::Address);
    }
}
