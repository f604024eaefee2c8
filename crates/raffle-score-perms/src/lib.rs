//! # Raffle Score Permissions
//!
//! Single-owner access control.
//!
//! ## Overview
//!
//! Exactly one identity, the owner, may mutate the ledger. Every mutating
//! operation names its caller explicitly and is checked against the owner
//! with [`AccessControl::require_owner`]. The owner may hand the role to
//! another identity with [`AccessControl::transfer_ownership`]; the role can
//! never be left empty.
//!
//! ## Usage
//!
//! ```rust
//! use raffle_score_core::Identity;
//! use raffle_score_perms::AccessControl;
//!
//! let alice = Identity::from_bytes([0x0a; 20]);
//! let bob = Identity::from_bytes([0x0b; 20]);
//!
//! let mut access = AccessControl::new(alice).unwrap();
//! assert!(access.require_owner(&bob).is_err());
//!
//! let event = access.transfer_ownership(&alice, bob).unwrap();
//! assert_eq!(access.owner(), bob);
//! # let _ = event;
//! ```

pub mod access;
pub mod error;

pub use access::AccessControl;
pub use error::{PermsError, Result};
