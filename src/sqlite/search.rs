//! Exact k-nearest-neighbor search over the vector table.

use super::{vectors, Database, Result};
use crate::errors::Error;

/// Euclidean (L2) distance, accumulated in f64.
fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x as f64) - (*y as f64);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

impl Database {
    /// Return the `k` stored vectors closest to `query`, ascending by
    /// Euclidean distance, ties broken by lower ordinal.
    ///
    /// Scans every stored vector; exact brute-force k-NN is the intended
    /// behavior at this store's scale.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the query length differs from the
    /// database's dimension, `InvalidInput` if it contains non-finite values.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<(i64, f64)>> {
        if query.len() != self.dims {
            return Err(Error::DimensionMismatch {
                expected: self.dims,
                actual: query.len(),
            });
        }
        if query.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidInput(
                "query embedding contains NaN or infinite values".to_string(),
            ));
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT ordinal, embedding FROM memory_vectors")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;

        let mut hits: Vec<(i64, f64)> = Vec::new();
        for row in rows {
            let (ordinal, blob) = row?;
            let stored = vectors::blob_to_vec(&blob, self.dims)?;
            hits.push((ordinal, l2_distance(query, &stored)));
        }

        // Stored vectors are validated finite on write, so distances are
        // totally ordered here.
        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        hits.truncate(k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{test_db, test_embedding, TEST_DIMS};
    use super::*;

    fn unit(axis: usize) -> Vec<f32> {
        let mut v = vec![0.0f32; TEST_DIMS];
        v[axis] = 1.0;
        v
    }

    #[test]
    fn test_l2_distance_identical() {
        let v = test_embedding(0.5);
        assert!(l2_distance(&v, &v) < 1e-12);
    }

    #[test]
    fn test_l2_distance_known_value() {
        let a = vec![0.0f32, 0.0];
        let b = vec![3.0f32, 4.0];
        assert!((l2_distance(&a, &b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_orders_by_distance() {
        let db = test_db();
        db.put_vector(1, &test_embedding(1.0)).unwrap();
        db.put_vector(2, &test_embedding(0.0)).unwrap();
        db.put_vector(3, &test_embedding(0.9)).unwrap();

        let hits = db.nearest(&test_embedding(1.0), 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].0, 1);
        assert_eq!(hits[1].0, 3);
        assert_eq!(hits[2].0, 2);
        assert!(hits[0].1 <= hits[1].1 && hits[1].1 <= hits[2].1);
    }

    #[test]
    fn test_nearest_is_deterministic() {
        let db = test_db();
        db.put_vector(1, &unit(0)).unwrap();
        db.put_vector(2, &unit(1)).unwrap();
        db.put_vector(3, &unit(2)).unwrap();

        let query = test_embedding(0.25);
        let first = db.nearest(&query, 3).unwrap();
        let second = db.nearest(&query, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nearest_ties_broken_by_lower_ordinal() {
        let db = test_db();
        // Equidistant from the query along different axes.
        db.put_vector(7, &unit(1)).unwrap();
        db.put_vector(3, &unit(2)).unwrap();
        db.put_vector(5, &unit(3)).unwrap();

        let hits = db.nearest(&unit(0), 3).unwrap();
        let ordinals: Vec<i64> = hits.iter().map(|h| h.0).collect();
        assert_eq!(ordinals, vec![3, 5, 7]);
    }

    #[test]
    fn test_nearest_k_bound() {
        let db = test_db();
        for i in 1..=10 {
            db.put_vector(i, &test_embedding(i as f32 * 0.1)).unwrap();
        }

        let hits = db.nearest(&test_embedding(0.0), 5).unwrap();
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn test_nearest_k_larger_than_stored() {
        let db = test_db();
        db.put_vector(1, &test_embedding(0.5)).unwrap();
        let hits = db.nearest(&test_embedding(0.5), 100).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_nearest_empty_store() {
        let db = test_db();
        let hits = db.nearest(&test_embedding(0.5), 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_nearest_k_zero() {
        let db = test_db();
        db.put_vector(1, &test_embedding(0.5)).unwrap();
        let hits = db.nearest(&test_embedding(0.5), 0).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_nearest_wrong_query_dimension() {
        let db = test_db();
        let result = db.nearest(&vec![0.5f32; TEST_DIMS + 1], 5);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_nearest_non_finite_query() {
        let db = test_db();
        let mut query = test_embedding(0.5);
        query[0] = f32::NAN;
        let result = db.nearest(&query, 5);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
