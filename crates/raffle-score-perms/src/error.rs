//! Error types for the permissions module.

use raffle_score_core::Identity;
use thiserror::Error;

/// Errors that can occur during permission checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermsError {
    /// The caller is not the current owner.
    #[error("unauthorized account {account}")]
    Unauthorized { account: Identity },

    /// The proposed owner is the null identity.
    #[error("invalid owner {owner}")]
    InvalidOwner { owner: Identity },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
