//! Audit notifications published by the ledger.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::key::DateSequence;
use crate::score::Score;
use crate::types::{ClientId, Identity};

/// An audit notification.
///
/// Events are published once per state change, in the order the changes
/// were applied. A write that hits an already-present key changes nothing
/// and therefore publishes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A score slot went from absent to present.
    ScoreStored {
        client_id: ClientId,
        /// `(date << 128) | sequence`.
        date_with_sequence: U256,
        score: Score,
    },

    /// The owner changed. `previous` is the null identity for the initial
    /// assignment at construction.
    OwnershipTransferred {
        previous: Identity,
        new_owner: Identity,
    },
}

impl LedgerEvent {
    pub fn score_stored(client_id: ClientId, date_sequence: DateSequence, score: Score) -> Self {
        Self::ScoreStored {
            client_id,
            date_with_sequence: date_sequence.pack(),
            score,
        }
    }

    pub fn ownership_transferred(previous: Identity, new_owner: Identity) -> Self {
        Self::OwnershipTransferred {
            previous,
            new_owner,
        }
    }

    /// Short name of the event, for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScoreStored { .. } => "ScoreStored",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_stored_carries_packed_key() {
        let ds = DateSequence::from_parts(20240327, 3);
        let event = LedgerEvent::score_stored(ClientId::from(1u64), ds, Score::from(10000u64));

        let expected = (U256::from(20240327u64) << 128usize) | U256::from(3u64);
        match event {
            LedgerEvent::ScoreStored {
                date_with_sequence, ..
            } => assert_eq!(date_with_sequence, expected),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_event_json_shape() {
        let event = LedgerEvent::ownership_transferred(
            Identity::NULL,
            Identity::from_bytes([0x11; 20]),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "ownership_transferred");
        assert!(json.get("new_owner").is_some());

        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
