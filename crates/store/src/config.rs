use std::path::PathBuf;

/// Tuning knobs for the embedded store (§4.3). Left as a plain struct
/// rather than loaded from a file: this crate has no opinion on where the
/// values come from, only what they mean.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub cache_mib: usize,
    pub write_buffer_mib: usize,
    pub max_open_files: i32,
    pub compaction_concurrency: i32,
    pub disable_wal: bool,
    pub read_only: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            cache_mib: 512,
            write_buffer_mib: 64,
            max_open_files: -1,
            compaction_concurrency: 4,
            disable_wal: false,
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_cache_mib(mut self, cache_mib: usize) -> Self {
        self.cache_mib = cache_mib;
        self
    }

    pub fn with_write_buffer_mib(mut self, write_buffer_mib: usize) -> Self {
        self.write_buffer_mib = write_buffer_mib;
        self
    }
}
