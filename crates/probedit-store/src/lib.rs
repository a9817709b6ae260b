//! Probedit Storage Layer
//!
//! Implements the ProblemStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `problems` table, created on open if missing
//! - "Latest" is always the row with the greatest `created_at`, ties going
//!   to the row inserted last
//! - Updates pick the latest row inside the same statement that writes it
//!
//! # Examples
//!
//! ```no_run
//! use probedit_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for problem operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use probedit_domain::{Problem, ProblemId, ProblemStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_LATEST: &str = "SELECT id, created_at, source_problem, editable_problem
     FROM problems ORDER BY created_at DESC, rowid DESC LIMIT 1";

const UPDATE_LATEST: &str = "UPDATE problems SET editable_problem = ?1
     WHERE id = (SELECT id FROM problems ORDER BY created_at DESC, rowid DESC LIMIT 1)
     RETURNING id";

/// SQLite-based implementation of ProblemStore
///
/// # Thread Safety
///
/// SQLite connections are not `Sync`. Share a store across tasks behind a
/// mutex; every operation is a single statement.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use probedit_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("probedit.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert a fully-formed record, keeping its id and timestamp
    ///
    /// The timestamp is stored with microsecond precision.
    pub fn insert_record(&mut self, problem: &Problem) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO problems (id, created_at, source_problem, editable_problem)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                problem.id.to_string(),
                timestamp_to_text(&problem.created_at),
                &problem.source_problem,
                &problem.editable_problem,
            ],
        )?;

        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM problems", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_problem(row: &Row<'_>) -> rusqlite::Result<Problem> {
        let id_text: String = row.get(0)?;
        let id = ProblemId::from_string(&id_text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let created_text: String = row.get(1)?;
        let created_at = text_to_timestamp(&created_text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Problem {
            id,
            created_at,
            source_problem: row.get(2)?,
            editable_problem: row.get(3)?,
        })
    }
}

impl ProblemStore for SqliteStore {
    type Error = StoreError;

    fn latest_problem(&self) -> Result<Option<Problem>, Self::Error> {
        let problem = self
            .conn
            .query_row(SELECT_LATEST, [], Self::row_to_problem)
            .optional()?;

        Ok(problem)
    }

    fn update_latest_editable(
        &mut self,
        editable_problem: &str,
    ) -> Result<Option<ProblemId>, Self::Error> {
        let updated: Option<String> = self
            .conn
            .query_row(UPDATE_LATEST, params![editable_problem], |row| row.get(0))
            .optional()?;

        updated
            .map(|id| ProblemId::from_string(&id).map_err(StoreError::InvalidData))
            .transpose()
    }

    fn insert_problem(
        &mut self,
        source_problem: &str,
        editable_problem: &str,
    ) -> Result<Problem, Self::Error> {
        let mut problem = Problem::new(source_problem, editable_problem);
        problem.created_at = problem.created_at.trunc_subsecs(6);
        self.insert_record(&problem)?;
        Ok(problem)
    }
}

fn timestamp_to_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn text_to_timestamp(text: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("Invalid created_at '{}': {}", text, e)))
}
