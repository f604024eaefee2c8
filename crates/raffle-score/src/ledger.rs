//! The ledger: owner-gated, write-once score storage.
//!
//! Brings together the key encoding, the score store, ownership, and the
//! audit sink behind one handle.

use std::sync::Arc;

use raffle_score_core::{
    ClientId, CompositeKey, DateSequence, Identity, LedgerEvent, Score, SCORE_DECIMALS, U256,
};
use raffle_score_perms::AccessControl;
use raffle_score_store::{InsertResult, ScoreStore, StoreError};

use crate::audit::AuditSink;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// Why a batch entry was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Zero score, with `reject_zero_in_batch` enabled.
    ZeroScore,
}

/// Result of a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The score was stored and announced.
    Inserted,
    /// The slot was already occupied; nothing changed.
    AlreadyPresent,
    /// The entry was skipped by policy; nothing changed.
    Rejected(RejectReason),
}

impl WriteOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, WriteOutcome::Inserted)
    }
}

impl From<InsertResult> for WriteOutcome {
    fn from(result: InsertResult) -> Self {
        match result {
            InsertResult::Inserted => WriteOutcome::Inserted,
            InsertResult::AlreadyPresent => WriteOutcome::AlreadyPresent,
        }
    }
}

/// Per-entry outcomes of a batch write, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub date_sequence: DateSequence,
    pub outcomes: Vec<(ClientId, WriteOutcome)>,
}

impl BatchReport {
    pub fn inserted(&self) -> usize {
        self.count(|o| o.is_inserted())
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| *o == WriteOutcome::AlreadyPresent)
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, WriteOutcome::Rejected(_)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, pred: impl Fn(&WriteOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// The score ledger.
///
/// Mutating operations take `&mut self`, so they are serialized by the
/// borrow checker; each one either completes fully or leaves no trace.
/// Reads take `&self` and need no caller.
pub struct ScoreLedger<S: ScoreStore> {
    /// The storage backend.
    store: S,
    /// Where notifications go.
    sink: Arc<dyn AuditSink>,
    /// Owner state, mirrored into the store's owner cell.
    access: AccessControl,
    config: LedgerConfig,
}

impl<S: ScoreStore> ScoreLedger<S> {
    /// Number of fractional decimal digits in every score.
    pub const SCORE_DECIMALS: u8 = SCORE_DECIMALS;

    /// Initialize a ledger with `initial_owner`.
    ///
    /// Persists the owner and publishes `OwnershipTransferred` from the null
    /// identity. Fails with [`LedgerError::InvalidOwner`] for the null
    /// identity.
    pub fn new(
        store: S,
        sink: impl AuditSink + 'static,
        initial_owner: Identity,
        config: LedgerConfig,
    ) -> Result<Self> {
        let access = AccessControl::new(initial_owner)?;
        store.store_owner(&initial_owner)?;

        let ledger = Self {
            store,
            sink: Arc::new(sink),
            access,
            config,
        };
        ledger.publish(LedgerEvent::ownership_transferred(
            Identity::NULL,
            initial_owner,
        ));
        tracing::info!(owner = %initial_owner, "ledger initialized");

        Ok(ledger)
    }

    /// Reopen a ledger over a store that was initialized earlier.
    ///
    /// Publishes nothing. Fails with [`LedgerError::NotInitialized`] if the
    /// store holds no owner.
    pub fn open(store: S, sink: impl AuditSink + 'static, config: LedgerConfig) -> Result<Self> {
        let owner = store.load_owner()?.ok_or(LedgerError::NotInitialized)?;
        let access = AccessControl::new(owner)?;
        tracing::info!(owner = %owner, "ledger reopened");

        Ok(Self {
            store,
            sink: Arc::new(sink),
            access,
            config,
        })
    }

    /// The current owner.
    pub fn owner(&self) -> Identity {
        self.access.owner()
    }

    pub fn score_decimals(&self) -> u8 {
        Self::SCORE_DECIMALS
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Store one score at `(client_id, date, sequence)`.
    ///
    /// Checks run in order: caller is owner, score is positive, date and
    /// sequence fit in 128 bits. An occupied slot is not an error: the call
    /// returns [`WriteOutcome::AlreadyPresent`] and publishes nothing.
    pub fn store_score(
        &mut self,
        caller: &Identity,
        client_id: ClientId,
        date: U256,
        sequence: U256,
        score: Score,
    ) -> Result<WriteOutcome> {
        self.access.require_owner(caller)?;
        if score.is_zero() {
            return Err(LedgerError::ZeroScore);
        }
        let date_sequence = DateSequence::new(date, sequence)?;

        let key = CompositeKey::new(client_id, date_sequence);
        let outcome = WriteOutcome::from(self.store.insert_score(&key, score)?);

        if outcome.is_inserted() {
            self.publish(LedgerEvent::score_stored(client_id, date_sequence, score));
        }
        tracing::debug!(
            client_id = %client_id,
            key = %date_sequence,
            score = %score,
            ?outcome,
            "store_score"
        );

        Ok(outcome)
    }

    /// Store one score per client, all under the same `(date, sequence)`.
    ///
    /// `client_ids[i]` pairs with `scores[i]`. Occupied slots are skipped.
    /// Zero scores are accepted unless `reject_zero_in_batch` is set. If a
    /// client appears more than once, the first occurrence wins.
    ///
    /// Caller, length, and range checks happen before anything is written;
    /// the store then applies the batch atomically.
    pub fn store_multiple_scores(
        &mut self,
        caller: &Identity,
        date: U256,
        sequence: U256,
        client_ids: &[ClientId],
        scores: &[Score],
    ) -> Result<BatchReport> {
        self.access.require_owner(caller)?;
        if client_ids.len() != scores.len() {
            return Err(LedgerError::LengthMismatch {
                client_ids: client_ids.len(),
                scores: scores.len(),
            });
        }
        if let Some(max) = self.config.max_batch_len {
            if client_ids.len() > max {
                return Err(LedgerError::BatchTooLarge {
                    len: client_ids.len(),
                    max,
                });
            }
        }
        let date_sequence = DateSequence::new(date, sequence)?;

        // Whether each input entry reaches the store.
        let mut reaches_store = Vec::with_capacity(client_ids.len());
        let mut entries = Vec::with_capacity(client_ids.len());
        for (client_id, score) in client_ids.iter().zip(scores) {
            let rejected = self.config.reject_zero_in_batch && score.is_zero();
            reaches_store.push(!rejected);
            if !rejected {
                entries.push((CompositeKey::new(*client_id, date_sequence), *score));
            }
        }

        let results = self.store.insert_scores(&entries)?;
        if results.len() != entries.len() {
            return Err(short_batch(entries.len(), results.len()));
        }
        let mut results = results.into_iter();

        let mut outcomes = Vec::with_capacity(client_ids.len());
        for ((client_id, score), reaches_store) in client_ids.iter().zip(scores).zip(reaches_store) {
            let outcome = if reaches_store {
                results
                    .next()
                    .map(WriteOutcome::from)
                    .ok_or_else(|| short_batch(entries.len(), outcomes.len()))?
            } else {
                WriteOutcome::Rejected(RejectReason::ZeroScore)
            };
            if outcome.is_inserted() {
                self.publish(LedgerEvent::score_stored(*client_id, date_sequence, *score));
            }
            outcomes.push((*client_id, outcome));
        }

        let report = BatchReport {
            date_sequence,
            outcomes,
        };
        tracing::debug!(
            key = %date_sequence,
            entries = report.len(),
            inserted = report.inserted(),
            already_present = report.already_present(),
            rejected = report.rejected(),
            "store_multiple_scores"
        );

        Ok(report)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Score for `client_id` under a `"{date}_{sequence}"` key.
    ///
    /// Returns zero if nothing was stored there. A malformed key is
    /// [`LedgerError::Input`].
    pub fn get_score(&self, client_id: ClientId, string_key: &str) -> Result<Score> {
        let date_sequence = DateSequence::parse_string_key(string_key)?;
        self.lookup(client_id, date_sequence)
    }

    /// Same as [`get_score`](Self::get_score), rendered with four decimals.
    pub fn get_formatted_score(&self, client_id: ClientId, string_key: &str) -> Result<String> {
        Ok(self.get_score(client_id, string_key)?.format())
    }

    /// Score at a numeric `(date, sequence)`, zero if absent.
    ///
    /// Out-of-range components are [`LedgerError::Input`], the same as on
    /// the write path.
    pub fn score_at(&self, client_id: ClientId, date: U256, sequence: U256) -> Result<Score> {
        self.lookup(client_id, DateSequence::new(date, sequence)?)
    }

    /// All stored scores for a client, ordered by packed key.
    pub fn scores_for_client(&self, client_id: ClientId) -> Result<Vec<(DateSequence, Score)>> {
        Ok(self
            .store
            .scores_for_client(&client_id)?
            .into_iter()
            .map(|(key, score)| (key.date_sequence, score))
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────────────────────

    /// Hand ownership to `new_owner`.
    ///
    /// The owner cell in the store is updated before the in-memory state, so
    /// a storage failure leaves the old owner in place on both sides.
    pub fn transfer_ownership(&mut self, caller: &Identity, new_owner: Identity) -> Result<()> {
        let mut next = self.access.clone();
        let event = next.transfer_ownership(caller, new_owner)?;

        self.store.store_owner(&next.owner())?;
        self.access = next;
        self.publish(event);

        Ok(())
    }

    fn lookup(&self, client_id: ClientId, date_sequence: DateSequence) -> Result<Score> {
        let key = CompositeKey::new(client_id, date_sequence);
        Ok(self.store.get_score(&key)?.unwrap_or(Score::ZERO))
    }

    fn publish(&self, event: LedgerEvent) {
        self.sink.publish(&event);
    }
}

fn short_batch(expected: usize, got: usize) -> LedgerError {
    StoreError::InvalidData(format!(
        "store returned {got} results for a batch of {expected} entries"
    ))
    .into()
}
