//! `applyTokenMetadata` (§9 "Token-metadata priority") and the fetcher
//! injection point it falls back to. This engine never speaks to an
//! upstream node itself; `TokenMetadataFetcher` is the seam a caller plugs
//! an on-demand lookup into.

use std::sync::Arc;

use chainidx_types::{Address, Result, TokenMetadata, TokenStandard};
use once_cell::sync::OnceCell;

use crate::engine::Engine;

/// On-demand token metadata lookup, consulted only after the hard-coded
/// registry and the persisted cache both miss. Implementations typically
/// call out to an RPC node; this crate has no opinion on how.
pub trait TokenMetadataFetcher: Send + Sync {
    fn fetch(&self, address: &Address) -> Result<Option<TokenMetadata>>;
}

/// The chain's predeployed base-token system contract: always `ERC20`-shaped
/// metadata, never subject to the cache or an external fetcher.
const BASE_TOKEN_ADDRESS: Address = Address::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x80, 0x0a,
]);

fn system_contract_registry(address: &Address) -> Option<TokenMetadata> {
    if *address == BASE_TOKEN_ADDRESS {
        Some(TokenMetadata {
            address: *address,
            standard: TokenStandard::Erc20,
            name: "Base Token".into(),
            symbol: "ETH".into(),
            decimals: Some(18),
            total_supply: None,
            base_uri: None,
            supports_enumerable: false,
            supports_metadata: true,
            detected_at: 0,
            created_at: 0,
            updated_at: 0,
        })
    } else {
        None
    }
}

impl Engine {
    /// Injects the optional on-demand fetcher. §5 documents this as
    /// "injected once at setup; immutable thereafter" — a second call
    /// returns `Error::InvalidData` rather than silently replacing it.
    pub fn set_token_metadata_fetcher(&self, fetcher: Arc<dyn TokenMetadataFetcher>) -> Result<()> {
        self.token_metadata_fetcher
            .set(fetcher)
            .map_err(|_| chainidx_types::Error::invalid_data("token metadata fetcher already set"))
    }

    /// §9 "Token-metadata priority": registry, then cache, then the
    /// optional fetcher, writing back whatever is freshly resolved.
    /// Absence of the fetcher is benign — the method simply returns
    /// whatever the registry/cache already had, or `None`.
    pub fn apply_token_metadata(&self, address: &Address) -> Result<Option<TokenMetadata>> {
        if let Some(meta) = system_contract_registry(address) {
            return Ok(Some(meta));
        }
        if let Some(cached) = self.get_token_metadata(address)? {
            return Ok(Some(cached));
        }
        let Some(fetcher) = self.token_metadata_fetcher.get() else {
            return Ok(None);
        };
        let Some(fetched) = fetcher.fetch(address)? else {
            return Ok(None);
        };
        self.save_token_metadata(&fetched)?;
        Ok(Some(fetched))
    }
}

pub(crate) type FetcherSlot = OnceCell<Arc<dyn TokenMetadataFetcher>>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    struct StaticFetcher(TokenMetadata);

    impl TokenMetadataFetcher for StaticFetcher {
        fn fetch(&self, _address: &Address) -> Result<Option<TokenMetadata>> {
            Ok(Some(self.0.clone()))
        }
    }

    fn open_engine() -> (tempfile::TempDir, std::sync::Arc<Engine>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::open(&chainidx_store::StoreConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    #[test]
    fn base_token_resolves_from_registry_without_fetcher() {
        let (_dir, engine) = open_engine();
        let meta = engine.apply_token_metadata(&BASE_TOKEN_ADDRESS).unwrap().unwrap();
        assert_eq!(meta.symbol, "ETH");
    }

    #[test]
    fn unknown_address_without_fetcher_returns_none() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000aaaa");
        assert!(engine.apply_token_metadata(&addr).unwrap().is_none());
    }

    #[test]
    fn fetcher_result_is_cached_for_next_lookup() {
        let (_dir, engine) = open_engine();
        let addr = address!("000000000000000000000000000000000000bbbb");
        let fetched = TokenMetadata {
            address: addr,
            standard: TokenStandard::Erc20,
            name: "Example".into(),
            symbol: "EXM".into(),
            decimals: Some(6),
            total_supply: None,
            base_uri: None,
            supports_enumerable: false,
            supports_metadata: true,
            detected_at: 5,
            created_at: 5,
            updated_at: 5,
        };
        engine.set_token_metadata_fetcher(Arc::new(StaticFetcher(fetched.clone()))).unwrap();

        let resolved = engine.apply_token_metadata(&addr).unwrap().unwrap();
        assert_eq!(resolved, fetched);
        assert!(engine.get_token_metadata(&addr).unwrap().is_some());
    }

    #[test]
    fn second_fetcher_injection_is_rejected() {
        let (_dir, engine) = open_engine();
        let fetcher = Arc::new(StaticFetcher(TokenMetadata::default()));
        engine.set_token_metadata_fetcher(fetcher.clone()).unwrap();
        assert!(engine.set_token_metadata_fetcher(fetcher).is_err());
    }
}
