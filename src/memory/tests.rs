//! Tests for the memory store.

use tempfile::TempDir;

use super::*;
use crate::errors::Error;

const DIMS: usize = 8;

fn test_store() -> MemoryStore {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let store = MemoryStore::new(&path, DIMS).unwrap();
    std::mem::forget(dir);
    store
}

fn embedding(value: f32) -> Vec<f32> {
    vec![value; DIMS]
}

/// Ordinal sets of both tables, for asserting the 1:1 invariant.
fn table_ordinals(store: &MemoryStore) -> (Vec<i64>, Vec<i64>) {
    let conn = store.db.conn();
    let mut records: Vec<i64> = conn
        .prepare("SELECT ordinal FROM memories")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    let mut vectors: Vec<i64> = conn
        .prepare("SELECT ordinal FROM memory_vectors")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    records.sort_unstable();
    vectors.sort_unstable();
    (records, vectors)
}

#[test]
fn test_create_and_list() {
    let mut store = test_store();
    let id = store.create("favorite color is teal", &embedding(0.5)).unwrap();

    let memories = store.list().unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories[0].id, id);
    assert_eq!(memories[0].content, "favorite color is teal");
    assert!(!memories[0].created_at.is_empty());
}

#[test]
fn test_create_assigns_unique_ids() {
    let mut store = test_store();
    let first = store.create("first", &embedding(0.1)).unwrap();
    let second = store.create("second", &embedding(0.2)).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_create_empty_content_rejected() {
    let mut store = test_store();
    assert!(matches!(
        store.create("", &embedding(0.5)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        store.create("   \t\n", &embedding(0.5)),
        Err(Error::InvalidInput(_))
    ));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_create_oversized_content_rejected() {
    let mut store = test_store();
    let long = "x".repeat(store::MAX_INPUT_LENGTH + 1);
    let result = store.create(&long, &embedding(0.5));
    assert!(matches!(result, Err(Error::InputTooLong { .. })));
}

#[test]
fn test_create_wrong_dimension_leaves_store_unchanged() {
    let mut store = test_store();
    let result = store.create("content", &vec![0.5f32; DIMS + 1]);
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));

    let (records, vectors) = table_ordinals(&store);
    assert!(records.is_empty());
    assert!(vectors.is_empty());
}

#[test]
fn test_remove_deletes_both_halves() {
    let mut store = test_store();
    let id = store.create("to remove", &embedding(0.5)).unwrap();

    store.remove(&id).unwrap();

    assert!(store.list().unwrap().is_empty());
    let (records, vectors) = table_ordinals(&store);
    assert!(records.is_empty());
    assert!(vectors.is_empty());
}

#[test]
fn test_remove_nonexistent_leaves_store_unchanged() {
    let mut store = test_store();
    store.create("kept", &embedding(0.5)).unwrap();

    let result = store.remove("nonexistent-id");
    assert!(matches!(result, Err(Error::NotFound(_))));

    let (records, vectors) = table_ordinals(&store);
    assert_eq!(records.len(), 1);
    assert_eq!(records, vectors);
}

#[test]
fn test_bijection_across_create_remove_sequences() {
    let mut store = test_store();

    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(store.create(&format!("memory {i}"), &embedding(i as f32 * 0.1)).unwrap());
    }
    store.remove(&ids[1]).unwrap();
    store.remove(&ids[4]).unwrap();
    ids.push(store.create("after removals", &embedding(0.9)).unwrap());

    let (records, vectors) = table_ordinals(&store);
    assert_eq!(records, vectors);
    assert_eq!(records.len(), 5);
}

#[test]
fn test_search_round_trip() {
    let mut store = test_store();
    let id = store.create("searchable", &embedding(0.5)).unwrap();

    let hits = store.search(&embedding(0.5), 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "searchable");
    assert!(hits[0].distance < 1e-9);

    store.remove(&id).unwrap();
    assert!(store.search(&embedding(0.5), 5).unwrap().is_empty());
}

#[test]
fn test_search_orders_ascending_by_distance() {
    let mut store = test_store();
    store.create("far", &embedding(0.0)).unwrap();
    store.create("near", &embedding(0.9)).unwrap();
    store.create("middle", &embedding(0.5)).unwrap();

    let hits = store.search(&embedding(1.0), 10).unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].content, "near");
    assert_eq!(hits[1].content, "middle");
    assert_eq!(hits[2].content, "far");
    assert!(hits[0].distance <= hits[1].distance);
    assert!(hits[1].distance <= hits[2].distance);
}

#[test]
fn test_search_k_bound() {
    let mut store = test_store();
    for i in 0..10 {
        store.create(&format!("memory {i}"), &embedding(i as f32 * 0.1)).unwrap();
    }

    let hits = store.search(&embedding(0.0), 5).unwrap();
    assert_eq!(hits.len(), 5);

    let all = store.search(&embedding(0.0), 50).unwrap();
    assert_eq!(all.len(), 10);
}

#[test]
fn test_search_empty_store() {
    let store = test_store();
    let hits = store.search(&embedding(0.5), 5).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_search_wrong_dimension() {
    let store = test_store();
    let result = store.search(&vec![0.5f32; DIMS - 1], 5);
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
}

#[test]
fn test_search_drops_unresolvable_ordinal() {
    let mut store = test_store();
    let keep = store.create("kept", &embedding(0.9)).unwrap();
    store.create("orphaned", &embedding(0.1)).unwrap();

    // Break the invariant behind the store's back: strip the second record
    // while leaving its vector row in place.
    store
        .db
        .conn()
        .execute("DELETE FROM memories WHERE id != ?1", [&keep])
        .unwrap();

    let hits = store.search(&embedding(0.1), 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "kept");
}

#[test]
fn test_new_with_path_traversal_returns_error() {
    let result = MemoryStore::new(std::path::Path::new("../../etc/passwd"), DIMS);
    assert!(matches!(result, Err(Error::Config(_))));
}
