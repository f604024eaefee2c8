//! Ledger configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the ledger.
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Reject zero scores inside batch writes as well.
    ///
    /// Off by default: batch writes have always accepted zero scores while
    /// single writes reject them. When on, a zero entry is reported as
    /// rejected and skipped; the rest of the batch still applies.
    pub reject_zero_in_batch: bool,

    /// Upper bound on entries per batch write. `None` means unbounded.
    pub max_batch_len: Option<usize>,
}

impl LedgerConfig {
    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_reject_zero_in_batch(mut self, reject: bool) -> Self {
        self.reject_zero_in_batch = reject;
        self
    }

    pub fn with_max_batch_len(mut self, max: usize) -> Self {
        self.max_batch_len = Some(max);
        self
    }
}
