use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chainidx_types::{Error, Result};
use rocksdb::{DBCompressionType, Direction, IteratorMode, Options, ReadOptions, WriteBatch, WriteOptions, DB};

use crate::cancel::CancellationToken;
use crate::config::StoreConfig;

fn map_rocksdb_err(e: rocksdb::Error) -> Error {
    Error::internal(format!("rocksdb: {e}"))
}

fn build_options(config: &StoreConfig) -> Options {
    let mut opts = Options::default();
    opts.create_if_missing(true);
    opts.create_missing_column_families(true);
    opts.set_max_open_files(config.max_open_files);
    opts.set_write_buffer_size(config.write_buffer_mib * 1024 * 1024);
    opts.set_max_background_jobs(config.compaction_concurrency);
    opts.set_compression_type(DBCompressionType::Lz4);
    let cache = rocksdb::Cache::new_lru_cache(config.cache_mib * 1024 * 1024);
    let mut block_opts = rocksdb::BlockBasedOptions::default();
    block_opts.set_block_cache(&cache);
    opts.set_block_based_table_factory(&block_opts);
    opts
}

/// Store Core (Component C, §4.3): a single ordered key-value namespace
/// over an embedded LSM engine. Every method is safe to call from multiple
/// OS threads concurrently (§5) — `DB` is internally synchronized and this
/// wrapper adds only the closed-flag check on top.
pub struct Store {
    db: DB,
    closed: AtomicBool,
    read_only: bool,
    disable_wal: bool,
}

impl Store {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let opts = build_options(config);
        let db = if config.read_only {
            DB::open_for_read_only(&opts, &config.path, false).map_err(map_rocksdb_err)?
        } else {
            DB::open(&opts, &config.path).map_err(map_rocksdb_err)?
        };
        tracing::info!(path = %config.path.display(), read_only = config.read_only, "store opened");
        Ok(Store {
            db,
            closed: AtomicBool::new(false),
            read_only: config.read_only,
            disable_wal: config.disable_wal,
        })
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(&StoreConfig::new(path.as_ref()))
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        tracing::info!("store closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        self.check_open()?;
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        Ok(())
    }

    // -- point operations ------------------------------------------------

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.db.put(key, value).map_err(map_rocksdb_err)
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.check_open()?;
        self.db.get(key).map_err(map_rocksdb_err)
    }

    pub fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.db.delete(key).map_err(map_rocksdb_err)
    }

    // -- prefix scans ------------------------------------------------------

    /// Invokes `callback(key, value)` for every entry under `prefix` in
    /// ascending key order, stopping early when the callback returns
    /// `Ok(false)` or `token` is cancelled.
    pub fn iterate(
        &self,
        prefix: &[u8],
        token: Option<&CancellationToken>,
        mut callback: impl FnMut(&[u8], &[u8]) -> Result<bool>,
    ) -> Result<()> {
        self.check_open()?;
        let mut read_opts = ReadOptions::default();
        if let Some(upper) = chainidx_schema::next_prefix(prefix) {
            read_opts.set_iterate_upper_bound(upper);
        }
        let iter = self
            .db
            .iterator_opt(IteratorMode::From(prefix, Direction::Forward), read_opts);
        for item in iter {
            if let Some(token) = token {
                if token.is_cancelled() {
                    return Err(Error::Cancelled);
                }
            }
            let (key, value) = item.map_err(map_rocksdb_err)?;
            if !key.starts_with(prefix) {
                break;
            }
            if !callback(&key, &value)? {
                break;
            }
        }
        Ok(())
    }

    /// Invokes `callback(key, value)` for every entry under `prefix` in
    /// descending key order (§4.5.2 "newest-first" listings: seek to the end
    /// of the prefix and iterate in reverse), stopping early when the
    /// callback returns `Ok(false)` or `token` is cancelled.
    pub fn iterate_rev(
        &self,
        prefix: &[u8],
        token: Option<&CancellationToken>,
        mut callback: impl FnMut(&[u8], &[u8]) -> Result<bool>,
    ) -> Result<()> {
        self.check_open()?;
        let upper = chainidx_schema::next_prefix(prefix);
        let iter = match &upper {
            Some(upper) => self.db.iterator(IteratorMode::From(upper, Direction::Reverse)),
            None => self.db.iterator(IteratorMode::End),
        };
        for item in iter {
            if let Some(token) = token {
                if token.is_cancelled() {
                    return Err(Error::Cancelled);
                }
            }
            let (key, value) = item.map_err(map_rocksdb_err)?;
            if key.starts_with(prefix) {
                if !callback(&key, &value)? {
                    break;
                }
            } else if key.as_ref() < prefix {
                break;
            }
            // else: key sits between the prefix range and `upper` (e.g. the
            // upper bound itself exists as a real key) — skip past it.
        }
        Ok(())
    }

    /// Collects up to `limit` entries under `prefix` starting at `offset`
    /// (§4.5.2 pagination protocol). Scans `offset + limit` entries rather
    /// than seeking directly, since keys are variable-width strings.
    pub fn scan_page(
        &self,
        prefix: &[u8],
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut out = Vec::with_capacity(limit);
        let mut skipped = 0usize;
        self.iterate(prefix, None, |k, v| {
            if skipped < offset {
                skipped += 1;
                return Ok(true);
            }
            out.push((k.to_vec(), v.to_vec()));
            Ok(out.len() < limit)
        })?;
        Ok(out)
    }

    pub fn count_by_prefix(&self, prefix: &[u8]) -> Result<u64> {
        let mut count = 0u64;
        self.iterate(prefix, None, |_, _| {
            count += 1;
            Ok(true)
        })?;
        Ok(count)
    }

    pub fn delete_by_prefix(&self, prefix: &[u8]) -> Result<u64> {
        self.check_writable()?;
        let mut batch = WriteBatch::default();
        let mut count = 0u64;
        self.iterate(prefix, None, |k, _| {
            batch.delete(k);
            count += 1;
            Ok(true)
        })?;
        if count > 0 {
            self.db.write(batch).map_err(map_rocksdb_err)?;
        }
        Ok(count)
    }

    pub fn compact(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Result<()> {
        self.check_open()?;
        self.db.compact_range(start, end);
        Ok(())
    }

    pub(crate) fn write_batch(&self, batch: WriteBatch, sync: bool) -> Result<()> {
        self.check_writable()?;
        let mut opts = WriteOptions::default();
        opts.set_sync(sync);
        opts.disable_wal(self.disable_wal);
        self.db.write_opt(batch, &opts).map_err(map_rocksdb_err)
    }
}

/// A `Store` handle shared across worker threads (§5: "parallel threads",
/// not async tasks).
pub type SharedStore = Arc<Store>;
