//! Composite key construction.
//!
//! Each score slot is addressed by `(client, packed)` where
//! `packed = (date << 128) | sequence`. Date and sequence are each bounded
//! to 128 bits, which is what makes the packing collision-free. Values that
//! do not fit are rejected at the packing boundary, never truncated.
//!
//! The externally visible form of a date-sequence is the string key
//! `"{date}_{sequence}"` in plain decimal.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::ClientId;

/// Bit width of each half of a packed date-sequence.
pub const HALF_BITS: usize = 128;

/// Separator between the date and the sequence in a string key.
pub const KEY_SEPARATOR: char = '_';

/// A `(date, sequence)` pair, each bounded to 128 bits.
///
/// The date is conventionally an 8-digit calendar date such as `20240327`,
/// but it is treated as an opaque ordinal and never validated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateSequence {
    pub date: u128,
    pub sequence: u128,
}

impl DateSequence {
    /// Build from already-bounded parts. Infallible.
    pub const fn from_parts(date: u128, sequence: u128) -> Self {
        Self { date, sequence }
    }

    /// Build from 256-bit inputs, rejecting either half if it exceeds 128 bits.
    pub fn new(date: U256, sequence: U256) -> Result<Self> {
        Ok(Self {
            date: bounded(date, "date")?,
            sequence: bounded(sequence, "sequence")?,
        })
    }

    /// Build from signed inputs, rejecting negatives.
    pub fn from_signed(date: i128, sequence: i128) -> Result<Self> {
        let date = u128::try_from(date).map_err(|_| CoreError::Negative { field: "date" })?;
        let sequence =
            u128::try_from(sequence).map_err(|_| CoreError::Negative { field: "sequence" })?;
        Ok(Self { date, sequence })
    }

    /// `(date << 128) | sequence`.
    pub fn pack(&self) -> U256 {
        (U256::from(self.date) << HALF_BITS) | U256::from(self.sequence)
    }

    /// Inverse of [`DateSequence::pack`]. Every 256-bit value unpacks.
    pub fn unpack(packed: U256) -> Self {
        Self {
            date: low_u128(packed >> HALF_BITS),
            sequence: low_u128(packed),
        }
    }

    /// The string key `"{date}_{sequence}"`.
    pub fn to_string_key(&self) -> String {
        format!("{}{}{}", self.date, KEY_SEPARATOR, self.sequence)
    }

    /// Parse a string key produced by [`DateSequence::to_string_key`].
    ///
    /// Only canonical keys are accepted: decimal digits on both sides of a
    /// single underscore, no sign, no whitespace, and no leading zeros
    /// other than a lone `0`. A non-canonical key would otherwise alias a
    /// canonical one and silently read another slot.
    pub fn parse_string_key(key: &str) -> Result<Self> {
        let malformed = |reason| CoreError::MalformedKey {
            key: key.to_string(),
            reason,
        };

        let (date, sequence) = key
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| malformed("missing '_' separator"))?;

        let date = parse_component(date).map_err(|reason| match reason {
            ComponentError::Overflow => CoreError::OutOfRange {
                field: "date",
                bits: HALF_BITS,
            },
            ComponentError::Malformed(reason) => malformed(reason),
        })?;
        let sequence = parse_component(sequence).map_err(|reason| match reason {
            ComponentError::Overflow => CoreError::OutOfRange {
                field: "sequence",
                bits: HALF_BITS,
            },
            ComponentError::Malformed(reason) => malformed(reason),
        })?;

        Ok(Self { date, sequence })
    }
}

impl fmt::Debug for DateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateSequence({}_{})", self.date, self.sequence)
    }
}

impl fmt::Display for DateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_key())
    }
}

impl std::str::FromStr for DateSequence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_string_key(s)
    }
}

/// Address of one score slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    pub client_id: ClientId,
    pub date_sequence: DateSequence,
}

impl CompositeKey {
    pub const fn new(client_id: ClientId, date_sequence: DateSequence) -> Self {
        Self {
            client_id,
            date_sequence,
        }
    }

    /// The packed date-sequence half of the key.
    pub fn packed(&self) -> U256 {
        self.date_sequence.pack()
    }
}

impl fmt::Debug for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompositeKey({}, {})",
            self.client_id,
            self.date_sequence.to_string_key()
        )
    }
}

/// Pack 256-bit date and sequence inputs, failing if either exceeds 128 bits.
pub fn pack(date: U256, sequence: U256) -> Result<U256> {
    DateSequence::new(date, sequence).map(|ds| ds.pack())
}

/// Split a packed value back into `(date, sequence)`.
pub fn unpack(packed: U256) -> (u128, u128) {
    let ds = DateSequence::unpack(packed);
    (ds.date, ds.sequence)
}

/// `"{date}_{sequence}"` in plain decimal.
pub fn format_string_key(date: u128, sequence: u128) -> String {
    DateSequence::from_parts(date, sequence).to_string_key()
}

/// Parse `"{date}_{sequence}"` back into its parts.
pub fn parse_string_key(key: &str) -> Result<(u128, u128)> {
    DateSequence::parse_string_key(key).map(|ds| (ds.date, ds.sequence))
}

fn bounded(value: U256, field: &'static str) -> Result<u128> {
    if value.bit_len() > HALF_BITS {
        return Err(CoreError::OutOfRange {
            field,
            bits: HALF_BITS,
        });
    }
    Ok(low_u128(value))
}

/// The low 128 bits of `value`.
fn low_u128(value: U256) -> u128 {
    let limbs = value.as_limbs();
    u128::from(limbs[0]) | (u128::from(limbs[1]) << 64)
}

enum ComponentError {
    Malformed(&'static str),
    Overflow,
}

fn parse_component(s: &str) -> std::result::Result<u128, ComponentError> {
    if s.is_empty() {
        return Err(ComponentError::Malformed("empty component"));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ComponentError::Malformed("components must be decimal digits"));
    }
    if s.len() > 1 && s.starts_with('0') {
        return Err(ComponentError::Malformed("leading zeros are not canonical"));
    }
    s.parse::<u128>().map_err(|_| ComponentError::Overflow)
}
