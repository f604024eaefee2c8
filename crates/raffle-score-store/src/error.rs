//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
