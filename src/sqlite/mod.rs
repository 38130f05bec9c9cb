//! SQLite backend for engram memory storage.
//!
//! This module provides:
//! - `Database`: Core SQLite connection and schema management
//! - `Memory`: Data structure for stored memories
//! - `records`: Record table operations (the text half of the store)
//! - `vectors`: BLOB conversion and vector table operations (the embedding half)
//! - `search`: Exact k-nearest-neighbor queries over the vector table

pub mod records;
pub mod search;
pub mod vectors;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::errors::Error;

/// A single memory record.
///
/// The ordinal linking a record to its embedding row is internal bookkeeping
/// and deliberately absent here; callers address memories by `id` only.
#[derive(Debug, Clone)]
pub struct Memory {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

pub type Result<T> = std::result::Result<T, Error>;

/// SQLite database backend holding both halves of the store.
///
/// The record table (`memories`) and the vector table (`memory_vectors`)
/// share the `ordinal` key. `AUTOINCREMENT` on the record table guarantees
/// ordinals are monotonically increasing and never reused.
pub struct Database {
    conn: Connection,
    dims: usize,
}

/// Initialize database schema.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS memories (
            ordinal     INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS memory_vectors (
            ordinal    INTEGER PRIMARY KEY,
            embedding  BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS meta (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

impl Database {
    /// Open or create a SQLite database at the given path.
    ///
    /// The embedding dimension is fixed when the database file is first
    /// created; reopening with a different dimension fails with
    /// `DimensionMismatch` rather than silently mixing vector layouts.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened, schema initialization
    /// fails, or `dims` disagrees with the dimension the file was created with.
    pub fn open(path: &Path, dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(Error::Config(
                "embedding dimension must be greater than 0".to_string(),
            ));
        }
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        check_dimensions(&conn, dims)?;
        Ok(Self { conn, dims })
    }

    /// Embedding dimension this database was created with.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Get internal connection (for internal use, e.g., tests).
    #[allow(dead_code)] // Used in consistency tests
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Verify the configured dimension against the one stored in `meta`,
/// recording it on first open.
fn check_dimensions(conn: &Connection, dims: usize) -> Result<()> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'embedding_dimensions'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match stored {
        Some(value) => {
            let expected: usize = value.parse().map_err(|_| {
                Error::Consistency(format!("unreadable stored dimension value: {value}"))
            })?;
            if expected != dims {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: dims,
                });
            }
            Ok(())
        }
        None => {
            conn.execute(
                "INSERT INTO meta (key, value) VALUES ('embedding_dimensions', ?1)",
                params![dims.to_string()],
            )?;
            Ok(())
        }
    }
}
