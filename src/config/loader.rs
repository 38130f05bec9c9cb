//! Configuration file loading and parsing.

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::Error;

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: PathBuf,

    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub api_base: String,

    #[serde(default)]
    pub chat_model: String,

    #[serde(default)]
    pub embedding_model: String,

    #[serde(default)]
    pub embedding_dimensions: Option<usize>,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Load configuration from TOML file.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    let config_path = config_dir.join("engram/config.toml");

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {e}",
                config_path.display()
            ))
        })?;

        let config: ConfigFile = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file {}: {e}",
                config_path.display()
            ))
        })?;

        Ok(Some(config))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let result: Result<ConfigFile, _> = toml::from_str("");
        assert!(result.is_ok());

        let config = result.unwrap();
        assert!(config.database_path.as_os_str().is_empty());
        assert!(config.provider.is_empty());
        assert!(config.embedding_dimensions.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_config_file() {
        let content = r#"
            provider = "gemini"
            embedding_dimensions = 768
        "#;

        let config: ConfigFile = toml::from_str(content).unwrap();
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.embedding_dimensions, Some(768));
        assert!(config.api_base.is_empty());
    }
}
