//! # Raffle Score Testkit
//!
//! Testing utilities for the raffle score ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned key-packing and score-formatting outputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready-made ledger with owner and audit log
//!
//! ## Golden Vectors
//!
//! ```rust
//! use raffle_score_testkit::vectors::{verify_format_vectors, verify_key_vectors};
//!
//! for check in verify_key_vectors().into_iter().chain(verify_format_vectors()) {
//!     assert!(check.matches, "{}: {}", check.name, check.actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use raffle_score_core::DateSequence;
//! use raffle_score_testkit::generators::date_sequence;
//!
//! proptest! {
//!     #[test]
//!     fn string_key_round_trips(ds in date_sequence()) {
//!         let key = ds.to_string_key();
//!         prop_assert_eq!(DateSequence::parse_string_key(&key).unwrap(), ds);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use raffle_score_testkit::fixtures::LedgerFixture;
//!
//! let mut fixture = LedgerFixture::new();
//! fixture.store(1, 1, 123_450_000);
//! assert_eq!(fixture.read(1, 1).format(), "12345.0000");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{identity, multi_party_identities, LedgerFixture};
