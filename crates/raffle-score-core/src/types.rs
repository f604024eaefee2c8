//! Strong type definitions for ledger participants.
//!
//! Client identifiers and caller identities are newtypes so that a client
//! id can never be passed where an account is expected.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a participant whose scores are recorded.
///
/// Client ids are opaque non-negative integers of up to 256 bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(pub U256);

impl ClientId {
    /// Create a client id from its integer value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// The integer value.
    pub const fn value(&self) -> U256 {
        self.0
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

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ClientId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for ClientId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// An account that calls into the ledger.
///
/// The ledger owner is one such identity. The all-zero address is the
/// null identity and can never hold ownership.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(pub Address);

impl Identity {
    /// The null identity (the zero address).
    pub const NULL: Self = Self(Address::ZERO);

    /// Create an identity from raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Address::from(bytes))
    }

    /// Get the raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// The underlying address.
    pub const fn address(&self) -> Address {
        self.0
    }

    /// Whether this is the null identity.
    pub fn is_null(&self) -> bool {
        self.0 == Address::ZERO
    }

    /// Convert to a lowercase hex string without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_slice())
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self::from_bytes(arr))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Address> for Identity {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Identity {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 20] = slice.try_into()?;
        Ok(Self::from_bytes(arr))
    }
}
