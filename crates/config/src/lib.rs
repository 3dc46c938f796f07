//! Configuration management for training data importers
//!
//! Supports loading:
//! - Import settings (config/domain/data paths) from YAML/TOML files
//!   and environment variables (DIALOGUE_DATA__ prefix)
//! - YAML documents, with `${VAR}` expansion
//! - Importer specifications declared under `importers:`

pub mod constants;
pub mod settings;
pub mod training_config;
pub mod yaml;

pub use settings::{load_settings, ImportSettings};
pub use training_config::{importer_specs, ImporterSpec};
pub use yaml::{expand_env_vars, is_yaml_file, parse_yaml_value};

use dialogue_data_core::DataLoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for DataLoadError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileNotFound(path) => DataLoadError::NotFound(path),
            other => DataLoadError::Config(other.to_string()),
        }
    }
}
