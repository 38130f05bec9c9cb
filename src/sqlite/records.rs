//! Record table operations.
//!
//! The record table stores memory text and metadata keyed by the external
//! id. It knows nothing about vectors; the `ordinal` it assigns is what ties
//! a record to its embedding row.

use rusqlite::{params, OptionalExtension};

use super::{Database, Memory, Result};
use crate::errors::Error;

impl Database {
    /// Append a new record and return the ordinal assigned to it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if a record with this id already exists.
    pub fn insert_record(&self, id: &str, content: &str, created_at: &str) -> Result<i64> {
        let result = self.conn.execute(
            "INSERT INTO memories (id, content, created_at) VALUES (?1, ?2, ?3)",
            params![id, content, created_at],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateId(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up the ordinal held by a record.
    pub fn ordinal_for(&self, id: &str) -> Result<Option<i64>> {
        let ordinal = self
            .conn
            .query_row(
                "SELECT ordinal FROM memories WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ordinal)
    }

    /// Delete a record, returning the ordinal it held.
    ///
    /// Returns `None` if no record with this id exists.
    pub fn delete_record(&self, id: &str) -> Result<Option<i64>> {
        let Some(ordinal) = self.ordinal_for(id)? else {
            return Ok(None);
        };
        self.conn
            .execute("DELETE FROM memories WHERE id = ?1", [id])?;
        Ok(Some(ordinal))
    }

    /// Reverse lookup: the record occupying a given ordinal.
    pub fn record_by_ordinal(&self, ordinal: i64) -> Result<Option<Memory>> {
        let memory = self
            .conn
            .query_row(
                "SELECT id, content, created_at FROM memories WHERE ordinal = ?1",
                [ordinal],
                |row| {
                    Ok(Memory {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(memory)
    }

    /// List all records, newest first.
    ///
    /// Rows sharing a timestamp are ordered by descending ordinal so the
    /// listing is deterministic.
    pub fn list_records(&self) -> Result<Vec<Memory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content, created_at FROM memories
             ORDER BY created_at DESC, ordinal DESC",
        )?;

        let memories: rusqlite::Result<Vec<Memory>> = stmt
            .query_map([], |row| {
                Ok(Memory {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect();

        Ok(memories?)
    }
}
