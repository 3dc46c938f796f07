//! Importer merging the results of several importers

use async_trait::async_trait;
use dialogue_data_core::{
    Domain, ImporterKind, Result, StoryGraph, TrainingConfig, TrainingData, TrainingDataImporter,
};
use futures::future::try_join_all;

/// Merges an ordered list of importers
///
/// All sources are queried concurrently; results fold in list order.
/// The first failing source aborts the call.
pub struct CombinedDataImporter {
    importers: Vec<Box<dyn TrainingDataImporter>>,
}

impl CombinedDataImporter {
    pub fn new(importers: Vec<Box<dyn TrainingDataImporter>>) -> Self {
        Self { importers }
    }

    pub fn importers(&self) -> &[Box<dyn TrainingDataImporter>] {
        &self.importers
    }
}

#[async_trait]
impl TrainingDataImporter for CombinedDataImporter {
    /// First non-empty config in list order
    async fn get_config(&self) -> Result<TrainingConfig> {
        let configs = try_join_all(self.importers.iter().map(|i| i.get_config())).await?;

        Ok(configs
            .into_iter()
            .find(|config| !config.is_empty())
            .unwrap_or_default())
    }

    async fn get_domain(&self) -> Result<Domain> {
        let domains = try_join_all(self.importers.iter().map(|i| i.get_domain())).await?;

        let domain = domains
            .iter()
            .fold(Domain::empty(), |merged, domain| merged.merge(domain));
        tracing::debug!(
            sources = domains.len(),
            intents = domain.intents.len(),
            actions = domain.action_names.len(),
            "Merged domains"
        );
        Ok(domain)
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        let graphs = try_join_all(self.importers.iter().map(|i| i.get_stories())).await?;

        Ok(graphs
            .iter()
            .fold(StoryGraph::default(), |merged, graph| merged.merge(graph)))
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        let data = try_join_all(self.importers.iter().map(|i| i.get_nlu_data())).await?;

        let merged = data
            .iter()
            .fold(TrainingData::default(), |merged, data| merged.merge(data));
        tracing::debug!(
            sources = data.len(),
            examples = merged.len(),
            responses = merged.responses.len(),
            "Merged NLU data"
        );
        Ok(merged)
    }

    fn name(&self) -> &str {
        "CombinedDataImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::Combined
    }

    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        self.importers.iter().map(|i| i.as_ref()).collect()
    }
}
