//! Nearest-neighbor search resolving vector hits back to memory records.

use crate::errors::Error;
use crate::memory_types::RetrievalHit;

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or results may be lost"]
    /// Find the `k` stored memories closest to `embedding`.
    ///
    /// Results are ordered ascending by Euclidean distance (ties by insertion
    /// order). `k` larger than the number of stored memories returns all of
    /// them; an empty store returns an empty vector, never an error.
    ///
    /// An ordinal the vector table returns but the record table cannot
    /// resolve violates the store invariant; the offending hit is logged and
    /// dropped rather than failing the whole search.
    ///
    /// # Errors
    ///
    /// Returns error if the query embedding has the wrong dimension, contains
    /// non-finite values, or the database query fails.
    pub fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievalHit>, Error> {
        let neighbors = self.db.nearest(embedding, k)?;

        let mut hits = Vec::with_capacity(neighbors.len());
        for (ordinal, distance) in neighbors {
            match self.db.record_by_ordinal(ordinal)? {
                Some(memory) => hits.push(RetrievalHit {
                    content: memory.content,
                    created_at: memory.created_at,
                    distance,
                }),
                None => {
                    tracing::warn!(
                        ordinal,
                        "vector row has no matching memory record, dropping from results"
                    );
                }
            }
        }
        Ok(hits)
    }
}
