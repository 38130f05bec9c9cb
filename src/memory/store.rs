//! Core memory store struct and input validation.

use std::path::Path;

use crate::errors::Error;
use crate::sqlite::Database;

/// Maximum allowed content length (100,000 characters).
pub const MAX_INPUT_LENGTH: usize = 100_000;

/// Memory store keeping the record table and the vector table in lockstep.
///
/// Invariant: for every live record there is exactly one vector row with the
/// same ordinal, and vice versa. Every write either commits both halves or
/// neither.
///
/// Write methods take `&mut self`; a store shared between threads must sit
/// behind a mutex so no caller observes a half-completed create or remove.
pub struct MemoryStore {
    pub(crate) db: Database,
}

impl MemoryStore {
    /// Open a memory store backed by the SQLite file at `db_path`.
    ///
    /// `dims` fixes the embedding dimension; it must match the dimension the
    /// database file was created with.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database path contains path traversal sequences (e.g., "../")
    /// - Parent directory cannot be canonicalized
    /// - Database cannot be opened
    /// - `dims` disagrees with an existing database file
    pub fn new(db_path: &Path, dims: usize) -> Result<Self, Error> {
        use std::path::Component;

        // Path traversal guard: reject parent directory components (works on all platforms)
        for component in db_path.components() {
            if matches!(component, Component::ParentDir) {
                return Err(Error::Config(
                    "Invalid database path: contains '..' which may escape the intended directory"
                        .to_string(),
                ));
            }
        }

        if let Some(parent) = db_path.parent() {
            std::fs::canonicalize(parent).map_err(|e| {
                Error::Config(format!(
                    "Invalid database path: parent directory not accessible: {}",
                    e
                ))
            })?;
        }

        let db = Database::open(db_path, dims)?;
        Ok(MemoryStore { db })
    }

    /// Embedding dimension this store accepts.
    pub fn dims(&self) -> usize {
        self.db.dims()
    }

    /// Validate content before embedding or storage.
    ///
    /// Rejects empty and whitespace-only content so no embedding call is
    /// spent on an unsearchable blank, and caps length.
    pub fn validate_content(text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "memory content must not be empty".to_string(),
            ));
        }
        if text.len() > MAX_INPUT_LENGTH {
            return Err(Error::InputTooLong {
                max_length: MAX_INPUT_LENGTH,
                actual_length: text.len(),
            });
        }
        Ok(())
    }
}
