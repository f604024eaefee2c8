//! Error types for the raffle score core.

use thiserror::Error;

/// Errors raised by the pure key and score primitives.
///
/// Every variant describes malformed caller input; none of them is
/// transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{field} does not fit in {bits} bits")]
    OutOfRange { field: &'static str, bits: usize },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("malformed string key {key:?}: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("malformed decimal score {input:?}: {reason}")]
    MalformedScore { input: String, reason: &'static str },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
