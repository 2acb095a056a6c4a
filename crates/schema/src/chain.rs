//! Optional chain-scoped key variant (§6.1): prefixes every key with
//! `/chain/{chain_id}`. Multi-chain deployments must use only the
//! chain-scoped form per physical store — mixing scoped and unscoped keys
//! in one store is a caller error this module does not try to detect.

use chainidx_types::{Error, Result};

pub fn chain_key(chain_id: u64, rest: &[u8]) -> Vec<u8> {
    let mut key = format!("/chain/{chain_id}").into_bytes();
    key.extend_from_slice(rest);
    key
}

/// Recovers `(chain_id, rest)` from a chain-scoped key. `rest` always
/// starts with `/`, matching the shape of an unscoped key so it can be fed
/// straight into an unscoped parser.
pub fn parse_chain_key(key: &[u8]) -> Result<(u64, &[u8])> {
    let s = std::str::from_utf8(key).map_err(|e| Error::invalid_key(format!("non-utf8 key: {e}")))?;
    let rest = s
        .strip_prefix("/chain/")
        .ok_or_else(|| Error::invalid_key("missing /chain/ prefix"))?;
    let slash = rest
        .find('/')
        .ok_or_else(|| Error::invalid_key("missing chain_id/rest separator"))?;
    let chain_id: u64 = rest[..slash]
        .parse()
        .map_err(|e| Error::invalid_key(format!("bad chain_id: {e}")))?;
    Ok((chain_id, &key[key.len() - (rest.len() - slash)..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_chain_scope() {
        let scoped = chain_key(137, b"/meta/lh");
        let (chain_id, rest) = parse_chain_key(&scoped).unwrap();
        assert_eq!(chain_id, 137);
        assert_eq!(rest, b"/meta/lh");
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_chain_key(b"/meta/lh").is_err());
    }
}
