//! Golden test vectors for deterministic verification.
//!
//! Key packing and score formatting are observable by every reader of the
//! ledger, so their outputs are pinned here.

use raffle_score_core::{DateSequence, Score, U256};
use serde::Serialize;

/// A key-packing vector.
#[derive(Debug, Clone, Serialize)]
pub struct KeyVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub date: u128,
    pub sequence: u128,
    /// Expected packed key, 32 bytes big-endian hex.
    pub expected_packed: &'static str,
    /// Expected string key.
    pub expected_string_key: &'static str,
}

/// A score-formatting vector.
#[derive(Debug, Clone, Serialize)]
pub struct FormatVector {
    pub name: &'static str,
    /// Raw fixed-point score, decimal.
    pub raw: &'static str,
    pub expected: &'static str,
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorCheck {
    pub name: String,
    pub matches: bool,
    pub actual: String,
}

/// Get all key-packing vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector {
            name: "first draw of a day",
            date: 20240327,
            sequence: 1,
            expected_packed: "0000000000000000000000000134d7c700000000000000000000000000000001",
            expected_string_key: "20240327_1",
        },
        KeyVector {
            name: "later draw of the same day",
            date: 20240327,
            sequence: 42,
            expected_packed: "0000000000000000000000000134d7c70000000000000000000000000000002a",
            expected_string_key: "20240327_42",
        },
        KeyVector {
            name: "all zero",
            date: 0,
            sequence: 0,
            expected_packed: "0000000000000000000000000000000000000000000000000000000000000000",
            expected_string_key: "0_0",
        },
        KeyVector {
            name: "date occupies the high half",
            date: 1,
            sequence: 0,
            expected_packed: "0000000000000000000000000000000100000000000000000000000000000000",
            expected_string_key: "1_0",
        },
        KeyVector {
            name: "sequence past 64 bits",
            date: 20991231,
            sequence: 1 << 64,
            expected_packed: "00000000000000000000000001404cff00000000000000010000000000000000",
            expected_string_key: "20991231_18446744073709551616",
        },
        KeyVector {
            name: "both components at maximum",
            date: u128::MAX,
            sequence: u128::MAX,
            expected_packed: "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            expected_string_key:
                "340282366920938463463374607431768211455_340282366920938463463374607431768211455",
        },
    ]
}

/// Get all score-formatting vectors.
pub fn format_vectors() -> Vec<FormatVector> {
    vec![
        FormatVector {
            name: "four fractional digits",
            raw: "12345678",
            expected: "1234.5678",
        },
        FormatVector {
            name: "trailing zero kept",
            raw: "123456780",
            expected: "12345.6780",
        },
        FormatVector {
            name: "zero",
            raw: "0",
            expected: "0.0000",
        },
        FormatVector {
            name: "smallest unit",
            raw: "1",
            expected: "0.0001",
        },
        FormatVector {
            name: "just below one",
            raw: "9999",
            expected: "0.9999",
        },
        FormatVector {
            name: "exactly one",
            raw: "10000",
            expected: "1.0000",
        },
        FormatVector {
            name: "full 256-bit width",
            raw: "115792089237316195423570985008687907853269984665640564039457584007913129639935",
            expected: "11579208923731619542357098500868790785326998466564056403945758400791312963.9935",
        },
    ]
}

/// Check every key vector against the packing and string-key encoders.
pub fn verify_key_vectors() -> Vec<VectorCheck> {
    key_vectors()
        .iter()
        .map(|v| {
            let ds = DateSequence::from_parts(v.date, v.sequence);
            let packed = hex::encode(ds.pack().to_be_bytes::<32>());
            let string_key = ds.to_string_key();
            let matches = packed == v.expected_packed && string_key == v.expected_string_key;

            VectorCheck {
                name: v.name.to_string(),
                matches,
                actual: format!("{packed} {string_key}"),
            }
        })
        .collect()
}

/// Check every format vector against [`Score::format`].
pub fn verify_format_vectors() -> Vec<VectorCheck> {
    format_vectors()
        .iter()
        .map(|v| match v.raw.parse::<U256>() {
            Ok(raw) => {
                let actual = Score::from_raw(raw).format();
                VectorCheck {
                    name: v.name.to_string(),
                    matches: actual == v.expected,
                    actual,
                }
            }
            Err(e) => VectorCheck {
                name: v.name.to_string(),
                matches: false,
                actual: format!("unparseable raw score: {e}"),
            },
        })
        .collect()
}

#[derive(Serialize)]
struct AllVectors {
    keys: Vec<KeyVector>,
    formats: Vec<FormatVector>,
}

/// Both vector sets as one JSON document, for comparing implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&AllVectors {
        keys: key_vectors(),
        formats: format_vectors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_vectors_match() {
        for check in verify_key_vectors() {
            assert!(check.matches, "{}: got {}", check.name, check.actual);
        }
    }

    #[test]
    fn test_format_vectors_match() {
        for check in verify_format_vectors() {
            assert!(check.matches, "{}: got {}", check.name, check.actual);
        }
    }

    #[test]
    fn test_key_vectors_round_trip() {
        for v in key_vectors() {
            let bytes = hex::decode(v.expected_packed).unwrap();
            let packed = U256::from_be_slice(&bytes);
            assert_eq!(
                DateSequence::unpack(packed),
                DateSequence::from_parts(v.date, v.sequence),
                "{}",
                v.name
            );
            assert_eq!(
                DateSequence::parse_string_key(v.expected_string_key).unwrap(),
                DateSequence::from_parts(v.date, v.sequence),
                "{}",
                v.name
            );
        }
    }

    #[test]
    fn test_format_vectors_parse_back() {
        for v in format_vectors() {
            let parsed = Score::from_decimal_str(v.expected).unwrap();
            assert_eq!(parsed.raw(), v.raw.parse::<U256>().unwrap(), "{}", v.name);
        }
    }

    #[test]
    fn test_key_vectors_survive_sqlite_reopen() {
        use raffle_score_core::{ClientId, CompositeKey};
        use raffle_score_store::{ScoreStore, SqliteStore};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.db");
        let client = ClientId::from(1u64);

        {
            let store = SqliteStore::open(&path).unwrap();
            for (i, v) in key_vectors().iter().enumerate() {
                let key = CompositeKey::new(client, DateSequence::from_parts(v.date, v.sequence));
                store.insert_score(&key, Score::from(i as u64 + 1)).unwrap();
            }
        }

        let store = SqliteStore::open(&path).unwrap();
        let stored = store.scores_for_client(&client).unwrap();
        assert_eq!(stored.len(), key_vectors().len());
        for (key, _) in stored {
            let packed = hex::encode(key.packed().to_be_bytes::<32>());
            assert!(
                key_vectors().iter().any(|v| v.expected_packed == packed),
                "unexpected packed key {packed}"
            );
        }
    }

    #[test]
    fn test_vectors_json() {
        let json = vectors_json().unwrap();
        assert!(json.contains("\"expected_string_key\": \"20240327_1\""));
        assert!(json.contains("\"expected\": \"12345.6780\""));
    }
}
