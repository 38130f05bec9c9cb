//! Vector table operations and embedding BLOB conversion.
//!
//! Each embedding is stored as little-endian IEEE-754 f32 values, contiguous,
//! no header. The layout is shared with other consumers of the database file
//! and must round-trip bit-for-bit.

use rusqlite::params;

use super::{Database, Result};
use crate::errors::Error;

/// Convert an embedding to its storage BLOB (little-endian bytes).
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vector length is not exactly `dims`,
/// `InvalidInput` if any value is NaN or infinite.
pub fn vec_to_blob(vec: &[f32], dims: usize) -> Result<Vec<u8>> {
    if vec.len() != dims {
        return Err(Error::DimensionMismatch {
            expected: dims,
            actual: vec.len(),
        });
    }
    if vec.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidInput(
            "embedding contains NaN or infinite values".to_string(),
        ));
    }
    Ok(vec.iter().flat_map(|&x| x.to_le_bytes()).collect())
}

/// Convert a storage BLOB back to an embedding.
///
/// # Errors
///
/// Returns `Consistency` if the blob length does not decode to exactly
/// `dims` values; a malformed stored blob means the write path misbehaved.
pub fn blob_to_vec(blob: &[u8], dims: usize) -> Result<Vec<f32>> {
    if blob.len() != dims * 4 {
        return Err(Error::Consistency(format!(
            "stored embedding is {} bytes, expected {} for {} dimensions",
            blob.len(),
            dims * 4,
            dims
        )));
    }
    let mut vec = Vec::with_capacity(dims);
    for chunk in blob.chunks_exact(4) {
        vec.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(vec)
}

impl Database {
    /// Associate an embedding with an ordinal.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vector length differs from the
    /// database's configured dimension.
    pub fn put_vector(&self, ordinal: i64, embedding: &[f32]) -> Result<()> {
        let blob = vec_to_blob(embedding, self.dims)?;
        self.conn.execute(
            "INSERT INTO memory_vectors (ordinal, embedding) VALUES (?1, ?2)",
            params![ordinal, blob],
        )?;
        Ok(())
    }

    /// Remove the embedding for an ordinal. Safe to call on a missing one.
    pub fn delete_vector(&self, ordinal: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM memory_vectors WHERE ordinal = ?1", [ordinal])?;
        Ok(())
    }

    /// Number of rows in the vector table.
    #[allow(dead_code)] // Used in vector and consistency tests
    pub(crate) fn vector_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM memory_vectors", [], |row| row.get(0))?;
        Ok(count)
    }
}
