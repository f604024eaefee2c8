//! Error types for the ledger.

use raffle_score_core::{CoreError, Identity};
use raffle_score_perms::PermsError;
use raffle_score_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller is not the current owner.
    #[error("unauthorized account {account}")]
    Unauthorized { account: Identity },

    /// The proposed owner is the null identity.
    #[error("invalid owner {owner}")]
    InvalidOwner { owner: Identity },

    /// Single-entry writes require a strictly positive score.
    #[error("score must be greater than 0")]
    ZeroScore,

    /// Batch arrays differ in length.
    #[error("client ids and scores differ in length: {client_ids} vs {scores}")]
    LengthMismatch { client_ids: usize, scores: usize },

    /// Batch exceeds the configured maximum.
    #[error("batch of {len} entries exceeds the limit of {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// Malformed key, out-of-range date or sequence, or bad score text.
    #[error("invalid input: {0}")]
    Input(#[from] CoreError),

    /// The store has no owner cell; it was never initialized.
    #[error("store has no owner; create the ledger with ScoreLedger::new first")]
    NotInitialized,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Coarse classification of [`LedgerError`].
///
/// `Unauthorized` and `InvalidInput` are permanent for the given inputs and
/// should be surfaced to the caller as-is. `Storage` comes from the host
/// substrate, not from the ledger logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    InvalidInput,
    Storage,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Unauthorized { .. } => ErrorKind::Unauthorized,
            LedgerError::InvalidOwner { .. }
            | LedgerError::ZeroScore
            | LedgerError::LengthMismatch { .. }
            | LedgerError::BatchTooLarge { .. }
            | LedgerError::Input(_) => ErrorKind::InvalidInput,
            LedgerError::NotInitialized | LedgerError::Store(_) => ErrorKind::Storage,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

impl From<PermsError> for LedgerError {
    fn from(e: PermsError) -> Self {
        match e {
            PermsError::Unauthorized { account } => LedgerError::Unauthorized { account },
            PermsError::InvalidOwner { owner } => LedgerError::InvalidOwner { owner },
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
