//! Context assembly for retrieval-augmented answers.

use crate::memory_types::RetrievalHit;

/// Fixed sentinel used when search returned nothing.
///
/// Part of the answer-generation contract: the prompt distinguishes "no
/// context" from "context present but irrelevant" by this exact string.
pub const NO_CONTEXT_SENTINEL: &str = "No relevant memories found.";

/// Format search hits into the context block for the answer prompt.
///
/// Hits are rendered as `[Date: <created_at>] <content>`, blank-line
/// separated, in the order given (ascending distance, most relevant first).
pub fn build_context(hits: &[RetrievalHit]) -> String {
    if hits.is_empty() {
        return NO_CONTEXT_SENTINEL.to_string();
    }

    hits.iter()
        .map(|hit| format!("[Date: {}] {}", hit.created_at, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
