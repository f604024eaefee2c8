//! Store trait: the abstract interface for score persistence.
//!
//! This trait allows the ledger to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory.

use raffle_score_core::{ClientId, CompositeKey, Identity, Score};

use crate::error::Result;

/// Result of inserting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The slot was empty and now holds the score.
    Inserted,
    /// The slot already held a score (idempotent - not an error).
    AlreadyPresent,
}

impl InsertResult {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertResult::Inserted)
    }
}

/// The store trait: minimal interface for score persistence.
///
/// Implementations can be in-memory, SQLite, or anything else offering a
/// linearizable key-value substrate. Every method is atomic on its own.
///
/// # Design Notes
///
/// - **Write-once**: a slot, once present, is never overwritten or removed.
/// - **Atomic batches**: [`ScoreStore::insert_scores`] either applies every
///   entry or, on a storage error, none of them.
/// - **Owner cell**: a single identity cell, absent until first written.
pub trait ScoreStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Score Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a score at a slot if the slot is empty.
    ///
    /// # Returns
    /// - `Inserted` if the slot was empty.
    /// - `AlreadyPresent` if the slot already held a value; it is unchanged.
    fn insert_score(&self, key: &CompositeKey, score: Score) -> Result<InsertResult>;

    /// Insert several scores in one atomic step.
    ///
    /// Entries are applied in order, each with the semantics of
    /// [`ScoreStore::insert_score`]. A key repeated within the batch is
    /// `Inserted` at its first occurrence and `AlreadyPresent` afterwards.
    fn insert_scores(&self, entries: &[(CompositeKey, Score)]) -> Result<Vec<InsertResult>>;

    /// Get the score at a slot, or `None` if never written.
    fn get_score(&self, key: &CompositeKey) -> Result<Option<Score>>;

    /// Check whether a slot holds a score.
    fn has_score(&self, key: &CompositeKey) -> Result<bool> {
        Ok(self.get_score(key)?.is_some())
    }

    /// All present slots for one client, ordered by packed date-sequence.
    fn scores_for_client(&self, client_id: &ClientId) -> Result<Vec<(CompositeKey, Score)>>;

    /// Number of present slots.
    fn score_count(&self) -> Result<usize>;

    // ─────────────────────────────────────────────────────────────────────────
    // Owner Cell
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the owner cell.
    fn load_owner(&self) -> Result<Option<Identity>>;

    /// Overwrite the owner cell.
    fn store_owner(&self, owner: &Identity) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for std::sync::Arc<S> {
    fn insert_score(&self, key: &CompositeKey, score: Score) -> Result<InsertResult> {
        (**self).insert_score(key, score)
    }

    fn insert_scores(&self, entries: &[(CompositeKey, Score)]) -> Result<Vec<InsertResult>> {
        (**self).insert_scores(entries)
    }

    fn get_score(&self, key: &CompositeKey) -> Result<Option<Score>> {
        (**self).get_score(key)
    }

    fn has_score(&self, key: &CompositeKey) -> Result<bool> {
        (**self).has_score(key)
    }

    fn scores_for_client(&self, client_id: &ClientId) -> Result<Vec<(CompositeKey, Score)>> {
        (**self).scores_for_client(client_id)
    }

    fn score_count(&self) -> Result<usize> {
        (**self).score_count()
    }

    fn load_owner(&self) -> Result<Option<Identity>> {
        (**self).load_owner()
    }

    fn store_owner(&self, owner: &Identity) -> Result<()> {
        (**self).store_owner(owner)
    }
}
