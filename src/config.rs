// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::Language;
use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `places.json` and `activities.json`
    pub data_dir: PathBuf,
    /// Path of the static metadata YAML document
    pub metadata_path: PathBuf,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Label language when a request does not ask for one
    pub default_language: Language,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            metadata_path: PathBuf::from("settings/metadata.yaml"),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8050,
            default_language: Language::Fr,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_language = match env::var("DEFAULT_LANGUAGE") {
            Ok(lang) => lang
                .parse()
                .map_err(|_| ConfigError::Invalid("DEFAULT_LANGUAGE", lang))?,
            Err(_) => Language::default(),
        };

        Ok(Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            metadata_path: env::var("METADATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("settings/metadata.yaml")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8050".to_string())
                .parse()
                .unwrap_or(8050),
            default_language,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATA_DIR", "/tmp/goats");
        env::set_var("DEFAULT_LANGUAGE", "en");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/goats"));
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.metadata_path, PathBuf::from("settings/metadata.yaml"));

        env::set_var("DEFAULT_LANGUAGE", "de");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("DEFAULT_LANGUAGE", _))
        ));

        env::remove_var("DATA_DIR");
        env::remove_var("DEFAULT_LANGUAGE");
    }
}
