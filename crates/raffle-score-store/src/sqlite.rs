//! SQLite implementation of the ScoreStore trait.
//!
//! This is the primary storage backend for the ledger. It uses rusqlite with
//! bundled SQLite. Durability is SQLite's own; this layer adds none.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use raffle_score_core::{ClientId, CompositeKey, DateSequence, Identity, Score, U256};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{InsertResult, ScoreStore};

const INSERT_SCORE_SQL: &str = "INSERT OR IGNORE INTO scores (client_id, date_sequence, score, inserted_at)
     VALUES (?1, ?2, ?3, ?4)";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute an operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock()?;
        f(&conn)
    }

    /// Execute an operation that needs mutable access (transactions).
    fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock()?;
        f(&mut conn)
    }
}

fn insert_one(conn: &Connection, key: &CompositeKey, score: Score, now: i64) -> Result<InsertResult> {
    let mut stmt = conn.prepare_cached(INSERT_SCORE_SQL)?;
    let changed = stmt.execute(params![
        key.client_id.to_be_bytes().as_slice(),
        key.packed().to_be_bytes::<32>().as_slice(),
        score.to_be_bytes().as_slice(),
        now,
    ])?;

    Ok(if changed == 1 {
        InsertResult::Inserted
    } else {
        InsertResult::AlreadyPresent
    })
}

fn word(bytes: Vec<u8>, column: &str) -> Result<[u8; 32]> {
    bytes.try_into().map_err(|b: Vec<u8>| {
        StoreError::InvalidData(format!("{} is {} bytes, expected 32", column, b.len()))
    })
}

fn row_to_entry(client_id: Vec<u8>, date_sequence: Vec<u8>, score: Vec<u8>) -> Result<(CompositeKey, Score)> {
    let client_id = ClientId::from_be_bytes(word(client_id, "client_id")?);
    let packed = U256::from_be_bytes(word(date_sequence, "date_sequence")?);
    let score = Score::from_be_bytes(word(score, "score")?);
    Ok((
        CompositeKey::new(client_id, DateSequence::unpack(packed)),
        score,
    ))
}

impl ScoreStore for SqliteStore {
    fn insert_score(&self, key: &CompositeKey, score: Score) -> Result<InsertResult> {
        self.with_conn(|conn| insert_one(conn, key, score, now_millis()))
    }

    fn insert_scores(&self, entries: &[(CompositeKey, Score)]) -> Result<Vec<InsertResult>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let now = now_millis();

            let results = entries
                .iter()
                .map(|(key, score)| insert_one(&tx, key, *score, now))
                .collect::<Result<Vec<_>>>()?;

            tx.commit()?;
            Ok(results)
        })
    }

    fn get_score(&self, key: &CompositeKey) -> Result<Option<Score>> {
        self.with_conn(|conn| {
            let bytes: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT score FROM scores WHERE client_id = ?1 AND date_sequence = ?2",
                    params![
                        key.client_id.to_be_bytes().as_slice(),
                        key.packed().to_be_bytes::<32>().as_slice(),
                    ],
                    |row| row.get(0),
                )
                .optional()?;

            bytes
                .map(|b| word(b, "score").map(Score::from_be_bytes))
                .transpose()
        })
    }

    fn has_score(&self, key: &CompositeKey) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM scores WHERE client_id = ?1 AND date_sequence = ?2)",
                params![
                    key.client_id.to_be_bytes().as_slice(),
                    key.packed().to_be_bytes::<32>().as_slice(),
                ],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn scores_for_client(&self, client_id: &ClientId) -> Result<Vec<(CompositeKey, Score)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT client_id, date_sequence, score FROM scores
                 WHERE client_id = ?1
                 ORDER BY date_sequence",
            )?;

            let rows = stmt
                .query_map(params![client_id.to_be_bytes().as_slice()], |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, Vec<u8>>(1)?,
                        row.get::<_, Vec<u8>>(2)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(c, ds, s)| row_to_entry(c, ds, s))
                .collect()
        })
    }

    fn score_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
            usize::try_from(count)
                .map_err(|_| StoreError::InvalidData(format!("negative row count {}", count)))
        })
    }

    fn load_owner(&self) -> Result<Option<Identity>> {
        self.with_conn(|conn| {
            let bytes: Option<Vec<u8>> = conn
                .query_row("SELECT address FROM owner WHERE slot = 0", [], |row| {
                    row.get(0)
                })
                .optional()?;

            bytes
                .map(|b| {
                    Identity::try_from(b.as_slice()).map_err(|_| {
                        StoreError::InvalidData(format!(
                            "owner address is {} bytes, expected 20",
                            b.len()
                        ))
                    })
                })
                .transpose()
        })
    }

    fn store_owner(&self, owner: &Identity) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO owner (slot, address, updated_at) VALUES (0, ?1, ?2)
                 ON CONFLICT(slot) DO UPDATE SET
                    address = excluded.address,
                    updated_at = excluded.updated_at",
                params![owner.as_bytes(), now_millis()],
            )?;
            Ok(())
        })
    }
}
