//! Address/hash aliases and the signed big-integer representation used for
//! balance deltas: absolute big-endian magnitude bytes plus an explicit
//! sign byte, rather than two's complement.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

pub type Address = alloy_primitives::Address;
pub type Hash32 = alloy_primitives::B256;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Sign {
    NonNegative,
    Negative,
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Sign::NonNegative => "+",
            Sign::Negative => "-",
        })
    }
}

/// A signed 256-bit integer stored as magnitude + sign rather than two's
/// complement, matching the wire format §6.2 documents for balance deltas.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignedU256 {
    pub sign: Sign,
    pub magnitude: U256,
}

impl SignedU256 {
    pub const ZERO: SignedU256 = SignedU256 {
        sign: Sign::NonNegative,
        magnitude: U256::ZERO,
    };

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative && !self.magnitude.is_zero()
    }

    pub fn from_magnitude(magnitude: U256, sign: Sign) -> Self {
        if magnitude.is_zero() {
            SignedU256 {
                sign: Sign::NonNegative,
                magnitude,
            }
        } else {
            SignedU256 { sign, magnitude }
        }
    }

    /// Adds `other` to `self`, returning `None` on signed overflow of the
    /// 256-bit magnitude (never returns a sign where the magnitude is zero).
    pub fn checked_add(&self, other: &SignedU256) -> Option<SignedU256> {
        match (self.sign, other.sign) {
            (Sign::NonNegative, Sign::NonNegative) => {
                let sum = self.magnitude.checked_add(other.magnitude)?;
                Some(SignedU256::from_magnitude(sum, Sign::NonNegative))
            }
            (Sign::Negative, Sign::Negative) => {
                let sum = self.magnitude.checked_add(other.magnitude)?;
                Some(SignedU256::from_magnitude(sum, Sign::Negative))
            }
            (Sign::NonNegative, Sign::Negative) => Some(sub_magnitudes(self.magnitude, other.magnitude)),
            (Sign::Negative, Sign::NonNegative) => Some(sub_magnitudes(other.magnitude, self.magnitude)),
        }
    }
}

fn sub_magnitudes(a: U256, b: U256) -> SignedU256 {
    if a >= b {
        SignedU256::from_magnitude(a - b, Sign::NonNegative)
    } else {
        SignedU256::from_magnitude(b - a, Sign::Negative)
    }
}

impl std::fmt::Display for SignedU256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

impl From<U256> for SignedU256 {
    fn from(magnitude: U256) -> Self {
        SignedU256::from_magnitude(magnitude, Sign::NonNegative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_mixed_signs_cancels_to_nonnegative_zero() {
        let a = SignedU256::from_magnitude(U256::from(5u64), Sign::NonNegative);
        let b = SignedU256::from_magnitude(U256::from(5u64), Sign::Negative);
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.sign, Sign::NonNegative);
        assert!(sum.magnitude.is_zero());
    }

    #[test]
    fn add_mixed_signs_negative_result() {
        let a = SignedU256::from_magnitude(U256::from(3u64), Sign::NonNegative);
        let b = SignedU256::from_magnitude(U256::from(10u64), Sign::Negative);
        let sum = a.checked_add(&b).unwrap();
        assert!(sum.is_negative());
        assert_eq!(sum.magnitude, U256::from(7u64));
    }
}
