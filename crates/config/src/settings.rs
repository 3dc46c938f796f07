//! Import settings
//!
//! Locations of the training config, the domain and the training data
//! handed to every leaf importer.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{env, paths};
use crate::ConfigError;

/// Paths a leaf importer reads from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Training configuration file
    #[serde(default = "default_config_path")]
    pub config_path: Option<PathBuf>,

    /// Domain file or directory of domain files
    #[serde(default = "default_domain_path")]
    pub domain_path: Option<PathBuf>,

    /// Training data files or directories
    #[serde(default = "default_training_data_paths")]
    pub training_data_paths: Vec<PathBuf>,
}

fn default_config_path() -> Option<PathBuf> {
    Some(PathBuf::from(paths::DEFAULT_CONFIG_PATH))
}

fn default_domain_path() -> Option<PathBuf> {
    Some(PathBuf::from(paths::DEFAULT_DOMAIN_PATH))
}

fn default_training_data_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(paths::DEFAULT_DATA_PATH)]
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            domain_path: default_domain_path(),
            training_data_paths: default_training_data_paths(),
        }
    }
}

impl ImportSettings {
    /// Settings without any paths
    pub fn empty() -> Self {
        Self {
            config_path: None,
            domain_path: None,
            training_data_paths: Vec::new(),
        }
    }

    /// Default layout below a project directory
    pub fn for_project(project_dir: impl AsRef<Path>) -> Self {
        let dir = project_dir.as_ref();
        Self {
            config_path: Some(dir.join(paths::DEFAULT_CONFIG_PATH)),
            domain_path: Some(dir.join(paths::DEFAULT_DOMAIN_PATH)),
            training_data_paths: vec![dir.join(paths::DEFAULT_DATA_PATH)],
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_domain_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.domain_path = Some(path.into());
        self
    }

    pub fn without_domain(mut self) -> Self {
        self.domain_path = None;
        self
    }

    pub fn with_training_data_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.training_data_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(config_path) = &self.config_path {
            if config_path.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "config_path".to_string(),
                    message: format!("{} is a directory, expected a file", config_path.display()),
                });
            }
        }

        if self
            .training_data_paths
            .iter()
            .any(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "training_data_paths".to_string(),
                message: "Paths must not be empty".to_string(),
            });
        }

        if self.training_data_paths.is_empty() {
            tracing::warn!("No training data paths configured, stories and NLU data will be empty");
        }

        Ok(())
    }
}

/// Load import settings
///
/// Layers an optional settings file (YAML, TOML or JSON) and environment
/// variables such as `DIALOGUE_DATA__CONFIG_PATH` or
/// `DIALOGUE_DATA__TRAINING_DATA_PATHS=data/nlu,data/stories`.
pub fn load_settings(settings_file: Option<&Path>) -> Result<ImportSettings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(file) = settings_file {
        if !file.exists() {
            return Err(ConfigError::FileNotFound(file.display().to_string()));
        }
        builder = builder.add_source(File::from(file));
    }

    builder = builder.add_source(
        Environment::with_prefix(env::SETTINGS_PREFIX)
            .prefix_separator(env::SETTINGS_SEPARATOR)
            .separator(env::SETTINGS_SEPARATOR)
            .list_separator(env::LIST_SEPARATOR)
            .with_list_parse_key("training_data_paths")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: ImportSettings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
