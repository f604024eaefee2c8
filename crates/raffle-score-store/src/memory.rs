//! In-memory implementation of the ScoreStore trait.
//!
//! Same semantics as SQLite but keeps everything in memory with no
//! persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use raffle_score_core::{ClientId, CompositeKey, Identity, Score};

use crate::error::Result;
use crate::traits::{InsertResult, ScoreStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Present slots.
    scores: HashMap<CompositeKey, Score>,

    /// The owner cell.
    owner: Option<Identity>,
}

impl MemoryStoreInner {
    fn insert(&mut self, key: &CompositeKey, score: Score) -> InsertResult {
        if self.scores.contains_key(key) {
            return InsertResult::AlreadyPresent;
        }
        self.scores.insert(*key, score);
        InsertResult::Inserted
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                scores: HashMap::new(),
                owner: None,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MemoryStore {
    fn insert_score(&self, key: &CompositeKey, score: Score) -> Result<InsertResult> {
        let mut inner = self.inner.write()?;
        Ok(inner.insert(key, score))
    }

    fn insert_scores(&self, entries: &[(CompositeKey, Score)]) -> Result<Vec<InsertResult>> {
        // One write guard for the whole batch: no reader sees it half-applied.
        let mut inner = self.inner.write()?;
        Ok(entries
            .iter()
            .map(|(key, score)| inner.insert(key, *score))
            .collect())
    }

    fn get_score(&self, key: &CompositeKey) -> Result<Option<Score>> {
        let inner = self.inner.read()?;
        Ok(inner.scores.get(key).copied())
    }

    fn scores_for_client(&self, client_id: &ClientId) -> Result<Vec<(CompositeKey, Score)>> {
        let inner = self.inner.read()?;

        let mut entries: Vec<(CompositeKey, Score)> = inner
            .scores
            .iter()
            .filter(|(key, _)| &key.client_id == client_id)
            .map(|(key, score)| (*key, *score))
            .collect();

        entries.sort_by_key(|(key, _)| key.date_sequence);
        Ok(entries)
    }

    fn score_count(&self) -> Result<usize> {
        let inner = self.inner.read()?;
        Ok(inner.scores.len())
    }

    fn load_owner(&self) -> Result<Option<Identity>> {
        let inner = self.inner.read()?;
        Ok(inner.owner)
    }

    fn store_owner(&self, owner: &Identity) -> Result<()> {
        let mut inner = self.inner.write()?;
        inner.owner = Some(*owner);
        Ok(())
    }
}
