//! Views exposing a subset of the training entities
//!
//! NLU-only and dialogue-only training share one underlying source; each
//! view returns empty values for the entities it hides.

use async_trait::async_trait;
use dialogue_data_core::{
    Domain, ImporterKind, Result, StoryGraph, TrainingConfig, TrainingData, TrainingDataImporter,
};

/// Exposes config and NLU data only
pub struct NluDataImporter {
    importer: Box<dyn TrainingDataImporter>,
}

impl NluDataImporter {
    pub fn new(importer: Box<dyn TrainingDataImporter>) -> Self {
        Self { importer }
    }

    pub fn importer(&self) -> &dyn TrainingDataImporter {
        self.importer.as_ref()
    }
}

#[async_trait]
impl TrainingDataImporter for NluDataImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        self.importer.get_config().await
    }

    async fn get_domain(&self) -> Result<Domain> {
        Ok(Domain::empty())
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        Ok(StoryGraph::default())
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        self.importer.get_nlu_data().await
    }

    fn name(&self) -> &str {
        "NluDataImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::NluOnly
    }

    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        vec![self.importer.as_ref()]
    }
}

/// Exposes config, domain and stories only
pub struct CoreDataImporter {
    importer: Box<dyn TrainingDataImporter>,
}

impl CoreDataImporter {
    pub fn new(importer: Box<dyn TrainingDataImporter>) -> Self {
        Self { importer }
    }

    pub fn importer(&self) -> &dyn TrainingDataImporter {
        self.importer.as_ref()
    }
}

#[async_trait]
impl TrainingDataImporter for CoreDataImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        self.importer.get_config().await
    }

    async fn get_domain(&self) -> Result<Domain> {
        self.importer.get_domain().await
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        self.importer.get_stories().await
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        Ok(TrainingData::default())
    }

    fn name(&self) -> &str {
        "CoreDataImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::CoreOnly
    }

    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        vec![self.importer.as_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryImporter;
    use dialogue_data_core::{Event, IntentProperties, Message, MessageKey, StoryStep};

    fn source() -> InMemoryImporter {
        InMemoryImporter::new()
            .with_config(TrainingConfig::new().with("language", "en"))
            .with_domain(Domain::empty().with_intent("greet", IntentProperties::default()))
            .with_stories(StoryGraph::new(vec![StoryStep::new(vec![
                Event::user_uttered(None, Some("greet")),
            ])]))
            .with_nlu_data(TrainingData::new(vec![Message::new()
                .with(MessageKey::Text, "hi")
                .with(MessageKey::Intent, "greet")]))
    }

    #[tokio::test]
    async fn test_nlu_view() {
        let importer = NluDataImporter::new(Box::new(source()));

        assert!(importer.get_domain().await.unwrap().is_empty());
        assert!(importer.get_stories().await.unwrap().is_empty());
        assert_eq!(importer.get_nlu_data().await.unwrap().len(), 1);
        assert!(!importer.get_config().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_core_view() {
        let importer = CoreDataImporter::new(Box::new(source()));

        assert!(importer.get_nlu_data().await.unwrap().is_empty());
        assert_eq!(importer.get_domain().await.unwrap().intents.len(), 1);
        assert_eq!(importer.get_stories().await.unwrap().len(), 1);
        assert_eq!(importer.importer().kind(), ImporterKind::InMemory);
    }
}
