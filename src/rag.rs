//! Retrieval-augmented answering over the memory store.

use crate::errors::Error;
use crate::memory::MemoryStore;
use crate::memory_types::Answer;
use crate::provider::{AnswerProvider, EmbeddingProvider};
use crate::retrieval::build_context;

/// Number of memories retrieved as grounding context. Fixed policy, not
/// user-configurable.
const CONTEXT_K: usize = 5;

/// Phrase the model is instructed to answer with when the context does not
/// contain the requested information.
pub const FALLBACK_PHRASE: &str = "I don't recall that.";

/// Ties the embedding and answer providers to the memory store.
pub struct RagEngine<P> {
    provider: P,
}

fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful memory assistant.\n\
         Answer the user question based STRICTLY on the following context.\n\
         If the answer is not in the context, say \"{FALLBACK_PHRASE}\"\n\
         \n\
         Context:\n\
         {context}"
    )
}

impl<P> RagEngine<P>
where
    P: EmbeddingProvider + AnswerProvider,
{
    pub fn new(provider: P) -> Self {
        RagEngine { provider }
    }

    #[must_use = "handle the error or the memory id is lost"]
    /// Embed `content` and store it as a new memory, returning its id.
    ///
    /// Content is validated before the embedding call so nothing is spent on
    /// input the store would reject anyway.
    ///
    /// # Errors
    ///
    /// Returns error if the content is invalid, the provider call fails, the
    /// returned vector does not match the store dimension, or storage fails.
    pub fn remember(&self, store: &mut MemoryStore, content: &str) -> Result<String, Error> {
        MemoryStore::validate_content(content)?;
        let embedding = self.provider.embed(content)?;
        store.create(content, &embedding)
    }

    #[must_use = "handle the error or the answer is lost"]
    /// Answer a query grounded on the most similar stored memories.
    ///
    /// Embeds the query, retrieves the top matches, and asks the answer
    /// provider to respond strictly from that context. Provider failures
    /// (including timeouts) propagate as errors; they are never folded into
    /// an empty-context answer.
    ///
    /// # Errors
    ///
    /// Returns error if the query is empty, a provider call fails, or the
    /// query embedding does not match the store dimension.
    pub fn answer(&self, store: &MemoryStore, query: &str) -> Result<Answer, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query must not be empty".to_string()));
        }

        let embedding = self.provider.embed(query)?;
        let hits = store.search(&embedding, CONTEXT_K)?;
        let context = build_context(&hits);

        let text = self.provider.complete(&system_prompt(&context), query)?;
        Ok(Answer {
            text,
            context_count: hits.len(),
        })
    }
}
