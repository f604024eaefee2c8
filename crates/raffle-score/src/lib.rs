//! # Raffle Score
//!
//! An append-only ledger of raffle scores, written only by a single owner
//! and readable by anyone.
//!
//! ## Overview
//!
//! Each score is an unsigned fixed-point number with four decimals, stored
//! once under `(client id, date, sequence)` and never rewritten. The owner
//! writes scores one at a time or in batches for the same date and sequence;
//! anyone reads them back with a `"{date}_{sequence}"` string key. Every
//! state change is published to an [`AuditSink`].
//!
//! ## Key Concepts
//!
//! - **Write-once slot**: a second write to the same key is a no-op, not an
//!   error.
//! - **Packed key**: `(date << 128) | sequence`, lossless for 128-bit
//!   components.
//! - **Owner**: the only identity allowed to write or hand over the role.
//!
//! ## Usage
//!
//! ```rust
//! use raffle_score::{LedgerConfig, MemoryAuditLog, ScoreLedger};
//! use raffle_score::core::{ClientId, Identity, Score, U256};
//! use raffle_score::store::MemoryStore;
//!
//! let owner = Identity::from_bytes([0x0a; 20]);
//! let mut ledger = ScoreLedger::new(
//!     MemoryStore::new(),
//!     MemoryAuditLog::new(),
//!     owner,
//!     LedgerConfig::default(),
//! )
//! .unwrap();
//!
//! ledger
//!     .store_score(
//!         &owner,
//!         ClientId::from(42u64),
//!         U256::from(20240327u64),
//!         U256::from(1u64),
//!         Score::from(123_450_000u64),
//!     )
//!     .unwrap();
//!
//! let formatted = ledger
//!     .get_formatted_score(ClientId::from(42u64), "20240327_1")
//!     .unwrap();
//! assert_eq!(formatted, "12345.0000");
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `raffle_score::core` - Scores, keys, identities, events
//! - `raffle_score::store` - Storage abstraction and SQLite
//! - `raffle_score::perms` - Single-owner access control

pub mod audit;
pub mod config;
pub mod error;
pub mod ledger;

// Re-export component crates
pub use raffle_score_core as core;
pub use raffle_score_perms as perms;
pub use raffle_score_store as store;

// Re-export main types for convenience
pub use audit::{AuditSink, JsonLinesAuditSink, MemoryAuditLog, TracingAuditSink};
pub use config::LedgerConfig;
pub use error::{ErrorKind, LedgerError, Result};
pub use ledger::{BatchReport, RejectReason, ScoreLedger, WriteOutcome};

// Re-export commonly used core types
pub use raffle_score_core::{ClientId, DateSequence, Identity, LedgerEvent, Score, U256};
