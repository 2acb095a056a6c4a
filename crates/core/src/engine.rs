use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chainidx_store::{SharedStore, Store, StoreConfig};
use chainidx_types::Result;

use crate::sequence::SequenceTracker;
use crate::token_metadata::FetcherSlot;

/// The engine ties the Store Core to the schema and codec, keeping a small
/// amount of in-memory state (the latest-height/tx-count cache and the
/// per-address sequence counters) that every Write Path and Read Path
/// operation goes through. Safe to share across OS threads via `Arc`.
pub struct Engine {
    pub(crate) store: SharedStore,
    pub(crate) latest_height: AtomicU64,
    pub(crate) has_latest_height: AtomicBool,
    pub(crate) transaction_count: AtomicU64,
    pub(crate) address_tx_sequences: SequenceTracker,
    pub(crate) address_balance_sequences: SequenceTracker,
    pub(crate) token_metadata_fetcher: FetcherSlot,
}

impl Engine {
    pub fn open(config: &StoreConfig) -> Result<Arc<Self>> {
        let store = Arc::new(Store::open(config)?);
        Self::from_store(store)
    }

    pub fn from_store(store: SharedStore) -> Result<Arc<Self>> {
        let latest_height = store
            .get(&chainidx_schema::latest_height_key())?
            .map(|bytes| chainidx_codec::decode_u64(&bytes))
            .transpose()?;
        let transaction_count = store
            .get(&chainidx_schema::transaction_count_key())?
            .map(|bytes| chainidx_codec::decode_u64(&bytes))
            .transpose()?
            .unwrap_or(0);

        let address_tx_sequences =
            SequenceTracker::seed_from_prefix_scan(&store, b"/index/addr/", |k| {
                chainidx_schema::parse_address_tx_key(k)
            })?;
        let address_balance_sequences =
            SequenceTracker::seed_from_prefix_scan(&store, b"/data/balance/", |k| {
                chainidx_schema::parse_address_balance_key(k)
            })?;

        tracing::info!(
            latest_height = ?latest_height,
            transaction_count,
            "engine opened"
        );

        Ok(Arc::new(Engine {
            store,
            latest_height: AtomicU64::new(latest_height.unwrap_or(0)),
            has_latest_height: AtomicBool::new(latest_height.is_some()),
            transaction_count: AtomicU64::new(transaction_count),
            address_tx_sequences,
            address_balance_sequences,
            token_metadata_fetcher: FetcherSlot::new(),
        }))
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn latest_height(&self) -> Option<u64> {
        self.has_latest_height
            .load(Ordering::SeqCst)
            .then(|| self.latest_height.load(Ordering::SeqCst))
    }

    pub fn transaction_count(&self) -> u64 {
        self.transaction_count.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.store.close();
    }
}
