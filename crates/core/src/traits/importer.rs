//! Importer trait

use async_trait::async_trait;

use crate::{Domain, Result, StoryGraph, TrainingConfig, TrainingData};

/// Source of the four training entities
///
/// Accessors may suspend (they can perform file I/O) and must be pure
/// projections of the current source state: calling one repeatedly
/// without the source changing yields structurally equal results.
///
/// # Example
///
/// ```ignore
/// let importer: Box<dyn TrainingDataImporter> = Box::new(FileImporter::new(settings));
/// let domain = importer.get_domain().await?;
/// let nlu = importer.get_nlu_data().await?;
/// println!("{} intents, {} examples", domain.intents.len(), nlu.len());
/// ```
#[async_trait]
pub trait TrainingDataImporter: Send + Sync {
    /// Training configuration
    async fn get_config(&self) -> Result<TrainingConfig>;

    /// Dialogue domain
    async fn get_domain(&self) -> Result<Domain>;

    /// Story and rule steps
    async fn get_stories(&self) -> Result<StoryGraph>;

    /// NLU training data
    async fn get_nlu_data(&self) -> Result<TrainingData>;

    /// Importer name for logging
    fn name(&self) -> &str;

    /// Variant tag, used to inspect a composed chain
    fn kind(&self) -> ImporterKind {
        ImporterKind::Custom
    }

    /// Importers wrapped by this one, in order
    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        Vec::new()
    }
}

/// Importer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImporterKind {
    /// Single project read from files
    File,
    /// Project importing other projects
    MultiProject,
    /// Values held in memory
    InMemory,
    /// Merges several importers
    Combined,
    /// Exposes NLU data and config only
    NluOnly,
    /// Exposes dialogue data and config only
    CoreOnly,
    /// Syncs retrieval intent responses into the domain
    RetrievalIntents,
    /// Adds NLU data and actions derived from stories
    EndToEnd,
    /// External importer
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl TrainingDataImporter for Fixed {
        async fn get_config(&self) -> Result<TrainingConfig> {
            Ok(TrainingConfig::new().with("language", "en"))
        }

        async fn get_domain(&self) -> Result<Domain> {
            Ok(Domain::empty())
        }

        async fn get_stories(&self) -> Result<StoryGraph> {
            Ok(StoryGraph::default())
        }

        async fn get_nlu_data(&self) -> Result<TrainingData> {
            Ok(TrainingData::default())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_trait_object_defaults() {
        let importer: Box<dyn TrainingDataImporter> = Box::new(Fixed);

        assert_eq!(importer.kind(), ImporterKind::Custom);
        assert!(importer.children().is_empty());
        assert!(!importer.get_config().await.unwrap().is_empty());
        assert!(importer.get_domain().await.unwrap().is_empty());
    }
}
