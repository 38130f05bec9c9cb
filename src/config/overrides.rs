//! Environment variable overrides for configuration.

use std::path::PathBuf;

use super::paths;
use super::Config;
use crate::errors::Error;

#[cfg(test)]
use super::tests_utils::ENV_MUTEX;

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Apply `ENGRAM_*` environment variable overrides to configuration.
///
/// The API key additionally falls back to `OPENAI_API_KEY`, matching what
/// existing OpenAI tooling already exports.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    if let Some(path) = env_string("ENGRAM_DATABASE_PATH") {
        let mut path = PathBuf::from(path);
        paths::expand_tilde(&mut path);
        config.database_path = path;
    }
    if let Some(provider) = env_string("ENGRAM_PROVIDER") {
        config.provider = provider;
    }
    if let Some(base) = env_string("ENGRAM_API_BASE") {
        config.api_base = base;
    }
    if let Some(key) = env_string("ENGRAM_API_KEY").or_else(|| env_string("OPENAI_API_KEY")) {
        config.api_key = key;
    }
    if let Some(model) = env_string("ENGRAM_CHAT_MODEL") {
        config.chat_model = model;
    }
    if let Some(model) = env_string("ENGRAM_EMBEDDING_MODEL") {
        config.embedding_model = model;
    }
    if let Some(dims) = env_string("ENGRAM_EMBEDDING_DIMENSIONS") {
        config.embedding_dimensions = dims.parse().map_err(|_| {
            Error::Config(format!(
                "ENGRAM_EMBEDDING_DIMENSIONS must be a positive integer, got: {dims}"
            ))
        })?;
    }
    if let Some(secs) = env_string("ENGRAM_REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = secs.parse().map_err(|_| {
            Error::Config(format!(
                "ENGRAM_REQUEST_TIMEOUT_SECS must be a positive integer, got: {secs}"
            ))
        })?;
    }
    Ok(())
}
