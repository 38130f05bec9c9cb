//! Configuration validation.

use super::Config;
use crate::errors::Error;

/// Validate a fully-resolved configuration.
pub fn validate(config: &Config) -> Result<(), Error> {
    if config.database_path.as_os_str().is_empty() {
        return Err(Error::Config("database_path must not be empty".to_string()));
    }
    if config.embedding_dimensions == 0 {
        return Err(Error::Config(
            "embedding_dimensions must be greater than 0".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(Error::Config(
            "request_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.api_base.is_empty() {
        return Err(Error::Config("api_base must not be empty".to_string()));
    }
    if config.chat_model.is_empty() {
        return Err(Error::Config("chat_model must not be empty".to_string()));
    }
    if config.embedding_model.is_empty() {
        return Err(Error::Config(
            "embedding_model must not be empty".to_string(),
        ));
    }
    Ok(())
}
