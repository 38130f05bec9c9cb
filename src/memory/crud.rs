//! Create, remove, and list operations keeping both store halves aligned.

use chrono::Utc;
use uuid::Uuid;

use crate::errors::Error;
use crate::sqlite::Memory;

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or the memory id is lost"]
    /// Store a memory together with its embedding, returning the new id.
    ///
    /// The embedding is validated against the store dimension before any row
    /// is written. The record row is written first; if the vector write then
    /// fails, the record is deleted again. A memory without an embedding must
    /// never survive: it would show up in `list` but be unreachable by
    /// search.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content is empty or exceeds the length cap
    /// - Embedding length differs from the store dimension
    /// - Database operations fail
    pub fn create(&mut self, content: &str, embedding: &[f32]) -> Result<String, Error> {
        Self::validate_content(content)?;
        if embedding.len() != self.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                actual: embedding.len(),
            });
        }

        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        let ordinal = self.db.insert_record(&id, content, &created_at)?;
        if let Err(err) = self.db.put_vector(ordinal, embedding) {
            if let Err(rollback) = self.db.delete_record(&id) {
                tracing::error!(%id, error = %rollback, "rollback after failed vector write did not complete");
                return Err(Error::Consistency(format!(
                    "record {id} has no embedding and could not be rolled back: {rollback}"
                )));
            }
            return Err(err);
        }

        Ok(id)
    }

    #[must_use = "handle the error or a failed delete goes unnoticed"]
    /// Remove a memory and its embedding.
    ///
    /// The vector row is deleted before the record row; a crash in between
    /// leaves a record the search path can no longer reach, never a vector
    /// whose ordinal search would still surface.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no memory with this id exists; the vector table
    /// is untouched in that case.
    pub fn remove(&mut self, id: &str) -> Result<(), Error> {
        let ordinal = self
            .db
            .ordinal_for(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        self.db.delete_vector(ordinal)?;
        self.db.delete_record(id)?;
        Ok(())
    }

    #[must_use = "handle the error or results may be lost"]
    /// List all memories, newest first.
    pub fn list(&self) -> Result<Vec<Memory>, Error> {
        self.db.list_records()
    }
}
