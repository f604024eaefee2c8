//! # Raffle Score Store
//!
//! Storage abstraction for the raffle score ledger. Provides a trait-based
//! interface over the two persisted structures: the score map and the owner
//! cell.
//!
//! ## Overview
//!
//! The ledger is storage-agnostic: it talks to a [`ScoreStore`]. The
//! primary implementation is [`SqliteStore`], with [`MemoryStore`] for tests
//! and embedded use.
//!
//! ## Key Types
//!
//! - [`ScoreStore`] - The trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage
//! - [`InsertResult`] - Result of inserting a score
//!
//! ## Usage
//!
//! ```rust,no_run
//! use raffle_score_store::{InsertResult, ScoreStore, SqliteStore};
//! use raffle_score_core::{ClientId, CompositeKey, DateSequence, Score};
//!
//! let store = SqliteStore::open("scores.db").unwrap();
//! let key = CompositeKey::new(ClientId::from(1u64), DateSequence::from_parts(20240327, 1));
//!
//! let first = store.insert_score(&key, Score::from(123450000u64)).unwrap();
//! assert_eq!(first, InsertResult::Inserted);
//!
//! // The slot is write-once.
//! let second = store.insert_score(&key, Score::from(1u64)).unwrap();
//! assert_eq!(second, InsertResult::AlreadyPresent);
//! ```
//!
//! ## Design Notes
//!
//! - **Write-once slots**: inserting at an occupied key returns `AlreadyPresent`
//!   and leaves the stored value untouched
//! - **Atomic batches**: `insert_scores` applies all entries or none; inside a
//!   batch each entry is independently `Inserted` or `AlreadyPresent`
//! - **No deletes**: the trait has no operation that removes or rewrites a score

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, ScoreStore};
