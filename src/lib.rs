//! engram - a local semantic memory store with retrieval-augmented recall.
//!
//! This crate stores short text memories alongside their embedding vectors,
//! keeps the two in lockstep under a shared ordinal, and answers natural
//! language questions grounded on the closest stored memories.
//! All operations are synchronous (no async/await required).
//!
//! # Example
//!
//! ```no_run
//! use engram::{Config, MemoryStore, OpenAiClient, RagEngine};
//!
//! let config = Config::load().expect("load configuration");
//! let mut store = MemoryStore::new(&config.database_path, config.embedding_dimensions)
//!     .expect("open store");
//!
//! let engine = RagEngine::new(OpenAiClient::new(
//!     config.provider_settings().expect("provider settings"),
//! ));
//!
//! let id = engine
//!     .remember(&mut store, "My favorite color is teal.")
//!     .expect("store memory");
//! println!("saved {id}");
//!
//! let answer = engine
//!     .answer(&store, "What is my favorite color?")
//!     .expect("answer");
//! println!("{} ({} memories used)", answer.text, answer.context_count);
//! ```
//!
//! # Storage layout
//!
//! Memories live in a SQLite file: a record table holds id, content, and
//! creation time; a vector table holds one embedding per record as raw
//! little-endian f32 bytes. Search is exact brute-force k-NN by Euclidean
//! distance, which is the right trade-off at personal-memory scale.

pub mod config;
pub mod errors;
pub mod memory;
pub mod memory_types;
pub mod provider;
pub mod rag;
pub mod retrieval;
mod sqlite;

// Re-export public API
pub use config::Config;
pub use errors::Error;
pub use memory::store::MAX_INPUT_LENGTH;
pub use memory::MemoryStore;
pub use memory_types::{Answer, RetrievalHit};
pub use provider::{AnswerProvider, EmbeddingProvider, OpenAiClient, ProviderSettings};
pub use rag::{RagEngine, FALLBACK_PHRASE};
pub use retrieval::{build_context, NO_CONTEXT_SENTINEL};
pub use sqlite::Memory;
