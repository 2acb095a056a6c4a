//! Store Core (Component C, §4.3): the single ordered key-value namespace
//! every other component reads and writes through. Wraps an embedded LSM
//! engine (`rocksdb`) behind a thread-safe API with explicit open/close
//! lifecycle, point operations, prefix scans, and atomic batches.

pub mod batch;
pub mod cancel;
pub mod config;
pub mod store;

pub use batch::{Batch, MAX_BATCH_OPS};
pub use cancel::CancellationToken;
pub use config::StoreConfig;
pub use store::{SharedStore, Store};

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_path(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn put_get_delete_round_trip() {
        let (_dir, store) = open_temp();
        store.put(b"/data/blocks/1", b"block-1").unwrap();
        assert_eq!(store.get(b"/data/blocks/1").unwrap(), Some(b"block-1".to_vec()));
        assert!(store.has(b"/data/blocks/1").unwrap());
        store.delete(b"/data/blocks/1").unwrap();
        assert_eq!(store.get(b"/data/blocks/1").unwrap(), None);
    }

    #[test]
    fn closed_store_rejects_all_operations() {
        let (_dir, store) = open_temp();
        store.close();
        assert!(matches!(store.get(b"/x"), Err(chainidx_types::Error::Closed)));
        assert!(matches!(store.put(b"/x", b"y"), Err(chainidx_types::Error::Closed)));
    }

    #[test]
    fn read_only_store_rejects_writes_but_allows_reads() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Store::open_path(dir.path()).unwrap();
            store.put(b"/data/blocks/1", b"v").unwrap();
        }
        let ro = Store::open(&StoreConfig::new(dir.path()).read_only()).unwrap();
        assert_eq!(ro.get(b"/data/blocks/1").unwrap(), Some(b"v".to_vec()));
        assert!(matches!(ro.put(b"/x", b"y"), Err(chainidx_types::Error::ReadOnly)));
    }

    #[test]
    fn iterate_respects_prefix_boundary() {
        let (_dir, store) = open_temp();
        store.put(b"/index/addr/0xaa/0001", b"a").unwrap();
        store.put(b"/index/addr/0xaa/0002", b"b").unwrap();
        store.put(b"/index/addr/0xbb/0001", b"c").unwrap();

        let mut seen = Vec::new();
        store
            .iterate(b"/index/addr/0xaa/", None, |k, _| {
                seen.push(k.to_vec());
                Ok(true)
            })
            .unwrap();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn scan_page_applies_offset_and_limit() {
        let (_dir, store) = open_temp();
        for i in 0..5u8 {
            store.put(format!("/p/{i}").as_bytes(), &[i]).unwrap();
        }
        let page = store.scan_page(b"/p/", 2, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].1, vec![2]);
        assert_eq!(page[1].1, vec![3]);
    }

    #[test]
    fn cancellation_token_stops_iteration() {
        let (_dir, store) = open_temp();
        for i in 0..10u8 {
            store.put(format!("/p/{i}").as_bytes(), &[i]).unwrap();
        }
        let token = CancellationToken::new();
        token.cancel();
        let err = store.iterate(b"/p/", Some(&token), |_, _| Ok(true)).unwrap_err();
        assert!(matches!(err, chainidx_types::Error::Cancelled));
    }

    #[test]
    fn batch_commits_atomically() {
        let (_dir, store) = open_temp();
        let mut batch = store.batch();
        batch.set(b"/a", b"1").unwrap();
        batch.set(b"/b", b"2").unwrap();
        batch.commit().unwrap();
        assert_eq!(store.get(b"/a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(b"/b").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn delete_by_prefix_removes_matching_entries_only() {
        let (_dir, store) = open_temp();
        store.put(b"/index/addr/0xaa/0001", b"a").unwrap();
        store.put(b"/index/addr/0xbb/0001", b"b").unwrap();
        let deleted = store.delete_by_prefix(b"/index/addr/0xaa/").unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get(b"/index/addr/0xbb/0001").unwrap().is_some());
    }
}
