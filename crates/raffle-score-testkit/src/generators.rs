//! Proptest generators for property-based testing.

use proptest::prelude::*;

use raffle_score_core::{ClientId, DateSequence, Identity, Score, U256};

/// Generate a ClientId across the full 256-bit range.
pub fn client_id() -> impl Strategy<Value = ClientId> {
    any::<[u8; 32]>().prop_map(ClientId::from_be_bytes)
}

/// Generate a ClientId from a small pool, so batches collide.
pub fn small_client_id() -> impl Strategy<Value = ClientId> {
    (0u64..8).prop_map(ClientId::from)
}

/// Generate a (date, sequence) pair.
pub fn date_sequence() -> impl Strategy<Value = DateSequence> {
    (any::<u128>(), any::<u128>()).prop_map(|(d, s)| DateSequence::from_parts(d, s))
}

/// Generate a 256-bit value that does not fit a key component.
pub fn oversized_component() -> impl Strategy<Value = U256> {
    (1u128..=u128::MAX, any::<u128>())
        .prop_map(|(high, low)| (U256::from(high) << 128usize) | U256::from(low))
}

/// Generate a strictly positive score.
pub fn positive_score() -> impl Strategy<Value = Score> {
    any::<[u8; 32]>()
        .prop_filter("score must be non-zero", |b| b.iter().any(|x| *x != 0))
        .prop_map(Score::from_be_bytes)
}

/// Generate any score, zero included with a fair chance.
pub fn score() -> impl Strategy<Value = Score> {
    prop_oneof![
        1 => Just(Score::ZERO),
        4 => (0u64..1_000_000_000).prop_map(Score::from),
        1 => positive_score(),
    ]
}

/// Generate a non-null identity.
pub fn identity() -> impl Strategy<Value = Identity> {
    any::<[u8; 20]>()
        .prop_filter("identity must not be null", |b| b.iter().any(|x| *x != 0))
        .prop_map(Identity::from_bytes)
}

/// Generate a batch of `(client, score)` entries with possible repeats.
pub fn batch(max_len: usize) -> impl Strategy<Value = Vec<(ClientId, Score)>> {
    prop::collection::vec((small_client_id(), score()), 0..=max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::LedgerFixture;
    use raffle_score::{LedgerConfig, LedgerEvent, WriteOutcome};
    use raffle_score_store::ScoreStore;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn test_second_write_never_changes_value(
            client in client_id(),
            ds in date_sequence(),
            first in positive_score(),
            second in positive_score(),
        ) {
            let mut fixture = LedgerFixture::new();
            let owner = fixture.owner;
            let (date, sequence) = (U256::from(ds.date), U256::from(ds.sequence));

            let a = fixture.ledger.store_score(&owner, client, date, sequence, first).unwrap();
            let b = fixture.ledger.store_score(&owner, client, date, sequence, second).unwrap();

            prop_assert_eq!(a, WriteOutcome::Inserted);
            prop_assert_eq!(b, WriteOutcome::AlreadyPresent);
            prop_assert_eq!(fixture.ledger.get_score(client, &ds.to_string_key()).unwrap(), first);
            prop_assert_eq!(fixture.drain_events().len(), 1);
        }

        #[test]
        fn test_oversized_components_never_written(
            client in client_id(),
            big in oversized_component(),
            small in any::<u128>(),
            score in positive_score(),
        ) {
            let mut fixture = LedgerFixture::new();
            let owner = fixture.owner;
            let small = U256::from(small);

            prop_assert!(fixture.ledger.store_score(&owner, client, big, small, score).is_err());
            prop_assert!(fixture.ledger.store_score(&owner, client, small, big, score).is_err());
            prop_assert_eq!(fixture.ledger.store().score_count().unwrap(), 0);
            prop_assert!(fixture.drain_events().is_empty());
        }

        #[test]
        fn test_batch_first_occurrence_wins(entries in batch(16)) {
            let mut fixture = LedgerFixture::new();
            let owner = fixture.owner;
            let (clients, scores): (Vec<_>, Vec<_>) = entries.iter().copied().unzip();

            let report = fixture
                .ledger
                .store_multiple_scores(&owner, U256::from(1u64), U256::from(1u64), &clients, &scores)
                .unwrap();

            let mut seen = HashSet::new();
            let mut expected_events = Vec::new();
            for (i, (client, score)) in entries.iter().enumerate() {
                if seen.insert(*client) {
                    prop_assert_eq!(report.outcomes[i].1, WriteOutcome::Inserted);
                    expected_events.push(LedgerEvent::score_stored(
                        *client,
                        DateSequence::from_parts(1, 1),
                        *score,
                    ));
                    prop_assert_eq!(fixture.ledger.get_score(*client, "1_1").unwrap(), *score);
                } else {
                    prop_assert_eq!(report.outcomes[i].1, WriteOutcome::AlreadyPresent);
                }
            }
            prop_assert_eq!(fixture.drain_events(), expected_events);
        }

        #[test]
        fn test_strict_batch_never_stores_zero(entries in batch(16)) {
            let mut fixture =
                LedgerFixture::with_config(LedgerConfig::default().with_reject_zero_in_batch(true));
            let owner = fixture.owner;
            let (clients, scores): (Vec<_>, Vec<_>) = entries.iter().copied().unzip();

            let report = fixture
                .ledger
                .store_multiple_scores(&owner, U256::from(1u64), U256::from(1u64), &clients, &scores)
                .unwrap();

            let zeros = scores.iter().filter(|s| s.is_zero()).count();
            prop_assert_eq!(report.rejected(), zeros);
            for client in &clients {
                let stored = fixture.ledger.get_score(*client, "1_1").unwrap();
                let positive_given = entries.iter().any(|(c, s)| c == client && !s.is_zero());
                prop_assert_eq!(stored.is_zero(), !positive_given);
            }
        }

        #[test]
        fn test_non_owner_never_mutates(
            caller in identity(),
            client in client_id(),
            ds in date_sequence(),
            score in positive_score(),
        ) {
            let mut fixture = LedgerFixture::new();
            prop_assume!(caller != fixture.owner);
            let (date, sequence) = (U256::from(ds.date), U256::from(ds.sequence));

            let err = fixture.ledger.store_score(&caller, client, date, sequence, score).unwrap_err();
            prop_assert!(err.is_unauthorized());
            let err = fixture
                .ledger
                .store_multiple_scores(&caller, date, sequence, &[client], &[score])
                .unwrap_err();
            prop_assert!(err.is_unauthorized());
            let err = fixture.ledger.transfer_ownership(&caller, caller).unwrap_err();
            prop_assert!(err.is_unauthorized());

            prop_assert_eq!(fixture.ledger.store().score_count().unwrap(), 0);
            prop_assert!(fixture.drain_events().is_empty());
        }
    }
}
