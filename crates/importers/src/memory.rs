//! In-memory importer
//!
//! Holds the four training entities directly. Values can be swapped at
//! runtime; every accessor returns a snapshot of the current value.

use std::sync::Arc;

use async_trait::async_trait;
use dialogue_data_core::{
    Domain, ImporterKind, Result, StoryGraph, TrainingConfig, TrainingData, TrainingDataImporter,
};
use parking_lot::RwLock;

#[derive(Debug, Clone, Default)]
struct Contents {
    config: TrainingConfig,
    domain: Domain,
    stories: StoryGraph,
    nlu_data: TrainingData,
}

/// Importer serving values held in memory
#[derive(Debug, Clone)]
pub struct InMemoryImporter {
    name: String,
    contents: Arc<RwLock<Contents>>,
}

impl Default for InMemoryImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryImporter {
    /// Create an importer with empty values
    pub fn new() -> Self {
        Self {
            name: "InMemoryImporter".to_string(),
            contents: Arc::new(RwLock::new(Contents::default())),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_config(self, config: TrainingConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn with_domain(self, domain: Domain) -> Self {
        self.set_domain(domain);
        self
    }

    pub fn with_stories(self, stories: StoryGraph) -> Self {
        self.set_stories(stories);
        self
    }

    pub fn with_nlu_data(self, nlu_data: TrainingData) -> Self {
        self.set_nlu_data(nlu_data);
        self
    }

    /// Replace the config
    pub fn set_config(&self, config: TrainingConfig) {
        self.contents.write().config = config;
    }

    /// Replace the domain
    pub fn set_domain(&self, domain: Domain) {
        self.contents.write().domain = domain;
    }

    /// Replace the stories
    pub fn set_stories(&self, stories: StoryGraph) {
        self.contents.write().stories = stories;
    }

    /// Replace the NLU data
    pub fn set_nlu_data(&self, nlu_data: TrainingData) {
        self.contents.write().nlu_data = nlu_data;
    }
}

#[async_trait]
impl TrainingDataImporter for InMemoryImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        Ok(self.contents.read().config.clone())
    }

    async fn get_domain(&self) -> Result<Domain> {
        Ok(self.contents.read().domain.clone())
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        Ok(self.contents.read().stories.clone())
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        Ok(self.contents.read().nlu_data.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::InMemory
    }
}
