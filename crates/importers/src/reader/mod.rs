//! Readers for project files
//!
//! Parses the YAML layouts consumed by the leaf importers:
//! - Domain files (`intents`, `slots`, `responses`, `actions`, …)
//! - Training data files (`nlu`, `responses`, `stories`, `rules`)
//!
//! File contents are read with `tokio::fs`; parsing itself is synchronous.

mod domain;
mod files;
mod nlu;
mod stories;

pub use domain::parse_domain;
pub(crate) use files::{canonical, exists, is_dir, is_file, list_files, read_file};

use std::path::{Path, PathBuf};

use dialogue_data_config::{is_yaml_file, parse_yaml_value, ConfigError};
use dialogue_data_core::{
    DataLoadError, Domain, Result, StoryGraph, TrainingConfig, TrainingData,
};
use serde::Deserialize;
use serde_json::Value;

/// Contents of one training data file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingDataFile {
    pub nlu: TrainingData,
    pub stories: StoryGraph,
}

impl TrainingDataFile {
    pub fn is_empty(&self) -> bool {
        self.nlu.is_empty() && self.stories.is_empty()
    }
}

/// Top level keys of a training data file
#[derive(Debug, Default, Deserialize)]
struct RawTrainingDataFile {
    #[serde(default)]
    nlu: Vec<nlu::RawNluItem>,
    #[serde(default)]
    responses: dialogue_data_core::Responses,
    #[serde(default)]
    stories: Vec<stories::RawStory>,
    #[serde(default)]
    rules: Vec<stories::RawRule>,
}

/// Parse the text of a training data file
pub fn parse_training_data(content: &str, origin: &str) -> Result<TrainingDataFile> {
    let raw: RawTrainingDataFile = deserialize(parse_value(content, origin)?, origin)?;

    let nlu = nlu::parse_nlu(&raw.nlu, origin)?.with_responses(raw.responses);
    let stories = stories::parse_stories(&raw.stories, &raw.rules, origin)?;

    Ok(TrainingDataFile { nlu, stories })
}

/// Read a training configuration file
pub async fn read_training_config(path: &Path) -> Result<TrainingConfig> {
    let origin = path.display().to_string();
    let content = read_file(path).await?;

    TrainingConfig::from_value(parse_value(&content, &origin)?)
        .ok_or_else(|| DataLoadError::invalid(&origin, "Training configuration must be a mapping"))
}

/// Training configuration at `path`, empty when there is none
pub async fn read_optional_training_config(path: Option<&Path>) -> Result<TrainingConfig> {
    match path {
        Some(path) if is_file(path).await => read_training_config(path).await,
        Some(path) => {
            tracing::debug!(path = %path.display(), "No training config found, using empty config");
            Ok(TrainingConfig::new())
        }
        None => Ok(TrainingConfig::new()),
    }
}

/// Read a domain file, or merge every YAML file of a domain directory
pub async fn read_domain(path: &Path) -> Result<Domain> {
    if is_dir(path).await {
        let mut domain = Domain::empty();
        for file in list_files(path).await?.into_iter().filter(|f| is_yaml_file(f)) {
            domain = domain.merge(&read_domain_file(&file).await?);
        }
        return Ok(domain);
    }

    read_domain_file(path).await
}

async fn read_domain_file(path: &Path) -> Result<Domain> {
    let origin = path.display().to_string();
    let content = read_file(path).await?;
    let domain = parse_domain(&content, &origin)?;

    tracing::debug!(
        path = %origin,
        intents = domain.intents.len(),
        actions = domain.action_names.len(),
        "Loaded domain file"
    );

    Ok(domain)
}

/// Read and parse one training data file
pub async fn read_training_data_file(path: &Path) -> Result<TrainingDataFile> {
    let origin = path.display().to_string();
    let content = read_file(path).await?;
    let file = parse_training_data(&content, &origin)?;

    tracing::debug!(
        path = %origin,
        examples = file.nlu.len(),
        responses = file.nlu.responses.len(),
        story_steps = file.stories.len(),
        "Loaded training data file"
    );

    Ok(file)
}

/// Expand training data paths into the YAML files below them
///
/// Paths that do not exist are skipped.
pub async fn collect_training_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !exists(path).await {
            tracing::warn!(path = %path.display(), "Training data path not found, skipping");
            continue;
        }
        for file in list_files(path).await? {
            if !is_yaml_file(&file) {
                tracing::debug!(path = %file.display(), "Skipping non-YAML training data file");
                continue;
            }
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }
    Ok(files)
}

/// Read every training data file and merge the results in order
pub async fn read_training_data(files: &[PathBuf]) -> Result<TrainingDataFile> {
    let mut merged = TrainingDataFile::default();
    for file in files {
        let data = read_training_data_file(file).await?;
        merged.nlu = merged.nlu.merge(&data.nlu);
        merged.stories = merged.stories.merge(&data.stories);
    }
    Ok(merged)
}

fn parse_value(content: &str, origin: &str) -> Result<Value> {
    parse_yaml_value(content, origin).map_err(|e| match e {
        ConfigError::ParseError(message) => DataLoadError::parse(origin, message),
        other => DataLoadError::from(other),
    })
}

fn deserialize<T: serde::de::DeserializeOwned>(value: Value, origin: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DataLoadError::invalid(origin, e.to_string()))
}
