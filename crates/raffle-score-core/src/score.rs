//! Fixed-point scores.
//!
//! A score is a non-negative integer scaled by 10^[`SCORE_DECIMALS`]: the
//! stored value `12345678` means `1234.5678`. All conversions use exact
//! 256-bit integer arithmetic; no floating point is involved anywhere.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Number of implied decimal digits in a stored score.
pub const SCORE_DECIMALS: u8 = 4;

/// `10^SCORE_DECIMALS`.
pub const SCORE_SCALE: u64 = 10_000;

/// A fixed-point score with [`SCORE_DECIMALS`] implied decimal places.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(pub U256);

impl Score {
    /// The zero score. Also what reads return for a slot never written.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a score from its raw scaled integer.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw scaled integer.
    pub const fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render as an exact decimal string with exactly four fractional digits.
    ///
    /// `12345678` renders as `"1234.5678"`, `123456780` as `"12345.6780"`
    /// and zero as `"0.0000"`.
    pub fn format(&self) -> String {
        let scale = U256::from(SCORE_SCALE);
        let whole = self.0 / scale;
        // The remainder is below 10^4, so it lives entirely in the lowest limb.
        let fraction = (self.0 % scale).as_limbs()[0];
        format!(
            "{whole}.{fraction:0width$}",
            width = usize::from(SCORE_DECIMALS)
        )
    }

    /// Parse a decimal string such as `"1234.5678"` or `"12"`.
    ///
    /// This is the inverse of [`Score::format`]. At most four fractional
    /// digits are accepted; signs, separators and exponents are rejected.
    pub fn from_decimal_str(input: &str) -> Result<Self> {
        let malformed = |reason| CoreError::MalformedScore {
            input: input.to_string(),
            reason,
        };

        if input.starts_with('-') {
            return Err(CoreError::Negative { field: "score" });
        }

        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (input, ""),
        };

        if whole.is_empty() {
            return Err(malformed("missing integer part"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("integer part must be decimal digits"));
        }
        if input.contains('.') && fraction.is_empty() {
            return Err(malformed("missing fractional digits after '.'"));
        }
        if fraction.len() > usize::from(SCORE_DECIMALS) {
            return Err(malformed("more than 4 fractional digits"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("fractional part must be decimal digits"));
        }

        let out_of_range = CoreError::OutOfRange {
            field: "score",
            bits: 256,
        };

        let whole = U256::from_str_radix(whole, 10).map_err(|_| out_of_range.clone())?;

        // Right-pad the fraction to exactly four digits: "5" means 5000.
        let mut fraction_units: u64 = 0;
        for i in 0..usize::from(SCORE_DECIMALS) {
            let digit = fraction.as_bytes().get(i).map_or(0, |b| u64::from(b - b'0'));
            fraction_units = fraction_units * 10 + digit;
        }

        let raw = whole
            .checked_mul(U256::from(SCORE_SCALE))
            .and_then(|scaled| scaled.checked_add(U256::from(fraction_units)))
            .ok_or(out_of_range)?;

        Ok(Self(raw))
    }

    /// Big-endian 32-byte encoding, used as the storage representation.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    /// Decode from the big-endian storage representation.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_be_bytes(bytes))
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<u64> for Score {
    fn from(raw: u64) -> Self {
        Self(U256::from(raw))
    }
}

impl From<u128> for Score {
    fn from(raw: u128) -> Self {
        Self(U256::from(raw))
    }
}

impl From<U256> for Score {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl TryFrom<i128> for Score {
    type Error = CoreError;

    fn try_from(raw: i128) -> Result<Self> {
        u128::try_from(raw)
            .map(Self::from)
            .map_err(|_| CoreError::Negative { field: "score" })
    }
}

impl TryFrom<i64> for Score {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self> {
        Self::try_from(i128::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_examples() {
        assert_eq!(Score::from(12345678u64).format(), "1234.5678");
        assert_eq!(Score::from(123456780u64).format(), "12345.6780");
        assert_eq!(Score::from(123450000u64).format(), "12345.0000");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(Score::ZERO.format(), "0.0000");
    }

    #[test]
    fn test_format_pads_small_fractions() {
        assert_eq!(Score::from(1u64).format(), "0.0001");
        assert_eq!(Score::from(10u64).format(), "0.0010");
        assert_eq!(Score::from(9999u64).format(), "0.9999");
        assert_eq!(Score::from(10000u64).format(), "1.0000");
        assert_eq!(Score::from(10001u64).format(), "1.0001");
    }

    #[test]
    fn test_format_max_is_exact() {
        let max = Score::from_raw(U256::MAX);
        let rendered = max.format();
        // 2^256 - 1 = 115792089237316195423570985008687907853269984665640564039457584007913129639935
        assert_eq!(
            rendered,
            "11579208923731619542357098500868790785326998466564056403945758400791312963.9935"
        );
        assert_eq!(Score::from_decimal_str(&rendered).unwrap(), max);
    }

    #[test]
    fn test_negative_signed_input_rejected() {
        assert_eq!(
            Score::try_from(-1i64),
            Err(CoreError::Negative { field: "score" })
        );
        assert_eq!(Score::try_from(5i128).unwrap(), Score::from(5u64));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Score::from_decimal_str("1234.5678").unwrap(), Score::from(12345678u64));
        assert_eq!(Score::from_decimal_str("12").unwrap(), Score::from(120000u64));
        assert_eq!(Score::from_decimal_str("1.5").unwrap(), Score::from(15000u64));
        assert_eq!(Score::from_decimal_str("0.0001").unwrap(), Score::from(1u64));
    }

    #[test]
    fn test_parse_decimal_rejects_malformed() {
        for bad in ["", ".5", "1.", "1.23456", "+1", "1e4", "1,5", " 1", "1.2a"] {
            assert!(
                matches!(Score::from_decimal_str(bad), Err(CoreError::MalformedScore { .. })),
                "expected {bad:?} to be rejected"
            );
        }
        assert_eq!(
            Score::from_decimal_str("-1.0"),
            Err(CoreError::Negative { field: "score" })
        );
    }

    #[test]
    fn test_parse_decimal_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert!(matches!(
            Score::from_decimal_str(&too_big),
            Err(CoreError::OutOfRange { field: "score", .. })
        ));
    }

    #[test]
    fn test_display_matches_format() {
        let score = Score::from(42u64);
        assert_eq!(score.to_string(), score.format());
        assert_eq!(format!("{score:?}"), "Score(42)");
    }

    proptest! {
        #[test]
        fn test_format_matches_integer_split(raw in any::<u128>()) {
            let rendered = Score::from(raw).format();
            let expected = format!("{}.{:04}", raw / 10_000, raw % 10_000);
            prop_assert_eq!(rendered, expected);
        }

        #[test]
        fn test_parse_inverts_format(limbs in any::<[u64; 4]>()) {
            let score = Score::from_raw(U256::from_limbs(limbs));
            prop_assert_eq!(Score::from_decimal_str(&score.format()).unwrap(), score);
        }
    }
}
