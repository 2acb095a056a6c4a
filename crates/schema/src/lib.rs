//! Key Schema (Component A, §4.1): pure builders and parsers for every key
//! this engine ever writes or reads. Every key is ASCII, uses `/` as a
//! visual separator, and orders numeric components as fixed-width
//! zero-padded decimal so that lexicographic byte order coincides with
//! numeric order (§3.4 invariant 6).

pub mod chain;
pub mod keys;

use chainidx_types::{Address, Error, Hash32, Result};

pub use chain::{chain_key, parse_chain_key};
pub use keys::*;

/// Width of a zero-padded block/sequence number component. `u64::MAX` has
/// 20 decimal digits.
pub const NUM_WIDTH: usize = 20;
/// Width of a zero-padded log/tx/auth index component.
pub const IDX_WIDTH: usize = 6;

pub(crate) fn pad_num(n: u64) -> String {
    format!("{:0width$}", n, width = NUM_WIDTH)
}

pub(crate) fn pad_idx(n: u32) -> String {
    format!("{:0width$}", n, width = IDX_WIDTH)
}

pub(crate) fn hex_address(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr.as_slice()))
}

pub(crate) fn hex_hash(hash: &Hash32) -> String {
    format!("0x{}", hex::encode(hash.as_slice()))
}

pub(crate) fn parse_hex_address(s: &str) -> Result<Address> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| Error::invalid_key(format!("bad address hex: {e}")))?;
    if bytes.len() != 20 {
        return Err(Error::invalid_key(format!(
            "address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

pub(crate) fn parse_hex_hash(s: &str) -> Result<Hash32> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| Error::invalid_key(format!("bad hash hex: {e}")))?;
    if bytes.len() != 32 {
        return Err(Error::invalid_key(format!(
            "hash must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Hash32::from_slice(&bytes))
}

pub(crate) fn parse_num(s: &str) -> Result<u64> {
    s.parse::<u64>()
        .map_err(|e| Error::invalid_key(format!("bad numeric component {s:?}: {e}")))
}

pub(crate) fn parse_idx(s: &str) -> Result<u32> {
    s.parse::<u32>()
        .map_err(|e| Error::invalid_key(format!("bad index component {s:?}: {e}")))
}

/// Splits a key into its `/`-separated segments, dropping the leading empty
/// segment produced by the initial `/`.
pub(crate) fn segments(key: &[u8]) -> Result<Vec<&str>> {
    let s = std::str::from_utf8(key).map_err(|e| Error::invalid_key(format!("non-utf8 key: {e}")))?;
    let s = s.strip_prefix('/').unwrap_or(s);
    Ok(s.split('/').collect())
}

/// Lexicographic successor of a prefix, for use as the exclusive upper
/// bound of a RocksDB prefix scan. `None` if `prefix` is empty or is all
/// `0xff` bytes (no finite successor exists; callers fall back to an
/// unbounded scan in that case).
pub fn next_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut out = prefix.to_vec();
    for i in (0..out.len()).rev() {
        if out[i] != 0xff {
            out[i] += 1;
            out.truncate(i + 1);
            return Some(out);
        }
    }
    None
}

pub(crate) fn expect_segments<'a>(segs: &[&'a str], expected_head: &[&str]) -> Result<()> {
    if segs.len() < expected_head.len() {
        return Err(Error::invalid_key(format!(
            "key too short, expected prefix {expected_head:?}, got {segs:?}"
        )));
    }
    for (got, want) in segs.iter().zip(expected_head.iter()) {
        if got != want {
            return Err(Error::invalid_key(format!(
                "key segment mismatch: expected {want:?}, got {got:?} in {segs:?}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_prefix_increments_last_non_ff_byte() {
        assert_eq!(next_prefix(b"/data/blocks/"), Some(b"/data/blocks\x2e".to_vec()));
        assert_eq!(next_prefix(b"a\xff"), Some(b"b".to_vec()));
        assert_eq!(next_prefix(b"\xff\xff"), None);
        assert_eq!(next_prefix(b""), None);
    }
}
