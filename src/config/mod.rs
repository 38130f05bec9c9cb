//! Configuration system for engram.

mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::Error;
use crate::provider::{self, ProviderSettings};

pub use loader::ConfigFile;

/// Configuration values with priority: defaults < config file < env vars.
///
/// Provider fields left unset by the file and environment are filled from
/// the named provider's preset during [`Config::load`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    #[serde(default)]
    pub database_path: PathBuf,

    /// Provider preset name (`openai` or `gemini`).
    #[serde(default)]
    pub provider: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default)]
    pub api_base: String,

    /// API key. Read from the environment, never persisted by engram.
    #[serde(default)]
    pub api_key: String,

    /// Chat completion model.
    #[serde(default)]
    pub chat_model: String,

    /// Embedding model.
    #[serde(default)]
    pub embedding_model: String,

    /// Embedding vector dimension. 0 means "take it from the preset".
    #[serde(default)]
    pub embedding_dimensions: usize,

    /// Timeout for provider HTTP calls, in seconds.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        let engram_dir = home.join(".engram");

        Self {
            database_path: engram_dir.join("memories.db"),
            provider: "openai".to_string(),
            api_base: String::new(),
            api_key: String::new(),
            chat_model: String::new(),
            embedding_model: String::new(),
            embedding_dimensions: 0,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, environment overrides,
    /// and provider preset fallbacks.
    pub fn load() -> Result<Self, Error> {
        let file_config = loader::load_from_file()?;

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;
        config.apply_preset()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = file.database_path;
        }
        if !file.provider.is_empty() {
            self.provider = file.provider;
        }
        if !file.api_base.is_empty() {
            self.api_base = file.api_base;
        }
        if !file.chat_model.is_empty() {
            self.chat_model = file.chat_model;
        }
        if !file.embedding_model.is_empty() {
            self.embedding_model = file.embedding_model;
        }
        if let Some(dims) = file.embedding_dimensions {
            self.embedding_dimensions = dims;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
    }

    /// Fill provider fields left unset from the named preset.
    fn apply_preset(&mut self) -> Result<(), Error> {
        let preset = provider::preset(&self.provider)?;
        if self.api_base.is_empty() {
            self.api_base = preset.api_base.to_string();
        }
        if self.chat_model.is_empty() {
            self.chat_model = preset.chat_model.to_string();
        }
        if self.embedding_model.is_empty() {
            self.embedding_model = preset.embedding_model.to_string();
        }
        if self.embedding_dimensions == 0 {
            self.embedding_dimensions = preset.embedding_dimensions;
        }
        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), Error> {
        validation::validate(self)
    }

    /// Connection settings for the provider client.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no API key is configured; commands that never
    /// talk to a provider don't require one.
    pub fn provider_settings(&self) -> Result<ProviderSettings, Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "no API key configured. Set ENGRAM_API_KEY (or OPENAI_API_KEY)".to_string(),
            ));
        }
        Ok(ProviderSettings {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            chat_model: self.chat_model.clone(),
            embedding_model: self.embedding_model.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }

    /// Ensure the parent directory for the database path exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(())
    }
}
