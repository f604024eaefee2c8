//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use raffle_score::{LedgerConfig, MemoryAuditLog, ScoreLedger, WriteOutcome};
use raffle_score_core::{ClientId, Identity, LedgerEvent, Score, U256};
use raffle_score_store::MemoryStore;

/// Date used by fixtures unless a test picks its own.
pub const FIXTURE_DATE: u64 = 20240327;

/// A ledger over a memory store, with its owner and audit log at hand.
pub struct LedgerFixture {
    pub owner: Identity,
    pub ledger: ScoreLedger<MemoryStore>,
    pub log: Arc<MemoryAuditLog>,
}

impl LedgerFixture {
    /// Create a fixture owned by [`identity(1)`](identity).
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_owner(identity(1), config)
    }

    /// Create with an explicit owner.
    ///
    /// The construction notification is drained, so `log` starts empty.
    pub fn with_owner(owner: Identity, config: LedgerConfig) -> Self {
        let log = Arc::new(MemoryAuditLog::new());
        let ledger = ScoreLedger::new(MemoryStore::new(), log.clone(), owner, config)
            .expect("fixture owner must not be null");
        log.take();
        Self { owner, ledger, log }
    }

    /// Store a score as the owner at `(FIXTURE_DATE, sequence)`.
    pub fn store(&mut self, client: u64, sequence: u64, score: u64) -> WriteOutcome {
        let owner = self.owner;
        self.ledger
            .store_score(
                &owner,
                ClientId::from(client),
                U256::from(FIXTURE_DATE),
                U256::from(sequence),
                Score::from(score),
            )
            .expect("fixture write must be valid")
    }

    /// Read a score back through the string-key path.
    pub fn read(&self, client: u64, sequence: u64) -> Score {
        self.ledger
            .get_score(ClientId::from(client), &format!("{FIXTURE_DATE}_{sequence}"))
            .expect("fixture key must be canonical")
    }

    /// Notifications published since the last call.
    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        self.log.take()
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A deterministic, non-null identity.
pub fn identity(n: u8) -> Identity {
    let mut bytes = [0u8; 20];
    bytes[19] = n.max(1);
    bytes[0] = n;
    Identity::from_bytes(bytes)
}

/// Create `count` distinct identities for multi-party tests.
pub fn multi_party_identities(count: usize) -> Vec<Identity> {
    (1..=count)
        .map(|i| {
            let mut bytes = [0u8; 20];
            bytes[12..].copy_from_slice(&(i as u64).to_be_bytes());
            Identity::from_bytes(bytes)
        })
        .collect()
}
