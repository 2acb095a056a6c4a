use chainidx_types::{Error, Result};
use rocksdb::WriteBatch;

use crate::store::Store;

/// Batches larger than this are rejected with `Error::BatchTooLarge` rather
/// than silently accepted; `IngestBlock` (§4.4.1) never gets close to this
/// for a single block, but a caller-assembled batch spanning many blocks
/// could.
pub const MAX_BATCH_OPS: usize = 100_000;

/// An atomic group of writes (§4.3). Durability is non-sync by default —
/// call [`Batch::sync`] to force an fsync on [`Batch::commit`], which
/// `IngestBlock` does for every block per §4.4.1.
pub struct Batch<'a> {
    store: &'a Store,
    inner: WriteBatch,
    sync: bool,
    ops: usize,
}

impl<'a> Batch<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Batch {
            store,
            inner: WriteBatch::default(),
            sync: false,
            ops: 0,
        }
    }

    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_capacity()?;
        self.inner.put(key, value);
        self.ops += 1;
        Ok(())
    }

    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.check_capacity()?;
        self.inner.delete(key);
        self.ops += 1;
        Ok(())
    }

    fn check_capacity(&self) -> Result<()> {
        if self.ops >= MAX_BATCH_OPS {
            return Err(Error::BatchTooLarge(format!(
                "batch exceeds {MAX_BATCH_OPS} operations"
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops == 0
    }

    /// Marks this batch to be committed with `fsync` durability.
    pub fn sync(mut self) -> Self {
        self.sync = true;
        self
    }

    pub fn reset(&mut self) {
        self.inner.clear();
        self.ops = 0;
    }

    pub fn commit(self) -> Result<()> {
        self.store.write_batch(self.inner, self.sync)
    }
}

impl Store {
    pub fn batch(&self) -> Batch<'_> {
        Batch::new(self)
    }
}
