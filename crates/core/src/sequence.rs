//! Per-address monotonic sequence counters for the address-transaction and
//! address-balance indexes (§4.4.3). Seeded by scanning the existing index
//! at open rather than trusting a separately persisted counter, which is
//! the resolved form of the known address-sequence gap: a persisted
//! counter that isn't updated in the same batch as the index entry it
//! numbers can drift out of sync after a crash between the two writes.

use std::collections::HashMap;
use std::sync::Mutex;

use chainidx_types::{Address, Result};

pub struct SequenceTracker {
    next: Mutex<HashMap<Address, u64>>,
}

impl SequenceTracker {
    /// Scans every key under `prefix`, extracts `(address, seq)` via
    /// `parse`, and seeds each address's counter to one past the highest
    /// sequence observed.
    pub fn seed_from_prefix_scan(
        store: &chainidx_store::Store,
        prefix: &[u8],
        parse: impl Fn(&[u8]) -> Result<(Address, u64)>,
    ) -> Result<Self> {
        let mut map: HashMap<Address, u64> = HashMap::new();
        store.iterate(prefix, None, |k, _| {
            let (addr, seq) = parse(k)?;
            let next = map.entry(addr).or_insert(0);
            if seq >= *next {
                *next = seq + 1;
            }
            Ok(true)
        })?;
        Ok(SequenceTracker {
            next: Mutex::new(map),
        })
    }

    pub fn next_seq(&self, addr: &Address) -> u64 {
        let mut guard = self.next.lock().expect("sequence tracker mutex poisoned");
        let entry = guard.entry(*addr).or_insert(0);
        let seq = *entry;
        *entry += 1;
        seq
    }
}
