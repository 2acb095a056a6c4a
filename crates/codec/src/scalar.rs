//! Raw scalar encodings for values that are not themselves records:
//! counters, boolean presence markers, and the signed balance-delta format
//! from §6.2 ("absolute big-endian bytes with an explicit sign byte").

use alloy_primitives::U256;
use chainidx_types::{Error, Result, Sign, SignedU256};

const MARKER_BYTE: u8 = 0x01;
const SIGN_NONNEGATIVE: u8 = 0x00;
const SIGN_NEGATIVE: u8 = 0x01;

pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn decode_u64(bytes: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| Error::invalid_data(format!("expected 8-byte counter, got {} bytes", bytes.len())))?;
    Ok(u64::from_be_bytes(arr))
}

/// Presence marker for active-set entries (active minter, active validator,
/// blacklist membership): a single `0x01` byte. Absence of the key, not a
/// different byte value, means "not a member".
pub fn encode_marker() -> Vec<u8> {
    vec![MARKER_BYTE]
}

pub fn decode_marker(bytes: &[u8]) -> Result<()> {
    if bytes == [MARKER_BYTE] {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "expected single marker byte 0x{MARKER_BYTE:02x}, got {bytes:?}"
        )))
    }
}

pub fn encode_signed_u256(value: &SignedU256) -> Vec<u8> {
    let mut out = Vec::with_capacity(33);
    out.push(match value.sign {
        Sign::NonNegative => SIGN_NONNEGATIVE,
        Sign::Negative => SIGN_NEGATIVE,
    });
    out.extend_from_slice(&value.magnitude.to_be_bytes::<32>());
    out
}

pub fn decode_signed_u256(bytes: &[u8]) -> Result<SignedU256> {
    if bytes.len() != 33 {
        return Err(Error::invalid_data(format!(
            "signed integer must be 33 bytes (1 sign + 32 magnitude), got {}",
            bytes.len()
        )));
    }
    let sign = match bytes[0] {
        SIGN_NONNEGATIVE => Sign::NonNegative,
        SIGN_NEGATIVE => Sign::Negative,
        other => return Err(Error::invalid_data(format!("bad sign byte 0x{other:02x}"))),
    };
    let magnitude = U256::from_be_slice(&bytes[1..]);
    Ok(SignedU256::from_magnitude(magnitude, sign))
}
