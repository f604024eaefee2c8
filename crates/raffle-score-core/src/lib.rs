//! # Raffle Score Core
//!
//! Pure primitives for the raffle score ledger: identifiers, fixed-point
//! scores, and the composite key scheme.
//!
//! This crate contains no I/O, no storage, no access control. It is pure
//! computation over 256-bit integers.
//!
//! ## Key Types
//!
//! - [`ClientId`] - Identifier of a participant whose scores are recorded
//! - [`Identity`] - An account that may call the ledger (the owner is one)
//! - [`Score`] - Fixed-point score with [`SCORE_DECIMALS`] implied decimals
//! - [`DateSequence`] - A `(date, sequence)` pair bounded to 128 bits each
//! - [`CompositeKey`] - The `(client, packed date-sequence)` slot address
//! - [`LedgerEvent`] - Audit notifications published by the ledger
//!
//! ## Key Packing
//!
//! A date and an intra-day sequence number collapse into one 256-bit value:
//! the date occupies the high 128 bits and the sequence the low 128 bits.
//! See the [`key`] module.
//!
//! ```rust
//! use raffle_score_core::{DateSequence, Score};
//!
//! let ds = DateSequence::from_parts(20240327, 1);
//! assert_eq!(ds.to_string_key(), "20240327_1");
//! assert_eq!(DateSequence::unpack(ds.pack()), ds);
//!
//! assert_eq!(Score::from(12345678u64).format(), "1234.5678");
//! ```

pub mod error;
pub mod event;
pub mod key;
pub mod score;
pub mod types;

pub use alloy_primitives::{Address, U256};
pub use error::{CoreError, Result};
pub use event::LedgerEvent;
pub use key::{format_string_key, pack, parse_string_key, unpack, CompositeKey, DateSequence};
pub use score::{Score, SCORE_DECIMALS, SCORE_SCALE};
pub use types::{ClientId, Identity};
