//! Self-described JSON encoding for every derived record that has no
//! upstream canonical wire format to stay compatible with (§4.2: "records
//! with no canonical upstream encoding use a self-described format").

use chainidx_types::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| Error::invalid_data(format!("json encode failed: {e}")))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::invalid_data(format!("json decode failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainidx_types::TxLocation;
    use alloy_primitives::b256;

    #[test]
    fn tx_location_round_trips() {
        let loc = TxLocation {
            block_height: 5,
            tx_index: 2,
            block_hash: b256!("000101010101010101010101010101010101010101010101010101010101010a"),
        };
        let bytes = encode(&loc).unwrap();
        let decoded: TxLocation = decode(&bytes).unwrap();
        assert_eq!(decoded, loc);
    }
}
