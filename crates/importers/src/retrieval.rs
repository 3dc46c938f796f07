//! Retrieval intent reconciliation
//!
//! Responses for retrieval intents are defined next to the NLU examples
//! (`utter_chitchat/ask_name`). The domain must know those responses and
//! register an `utter_<intent>` action per retrieval intent.

use async_trait::async_trait;
use dialogue_data_core::{
    Domain, ImporterKind, IntentProperties, Result, StoryGraph, TrainingConfig, TrainingData,
    TrainingDataImporter,
};

/// Syncs NLU responses and retrieval intents into the domain
pub struct RetrievalIntentImporter {
    importer: Box<dyn TrainingDataImporter>,
}

impl RetrievalIntentImporter {
    pub fn new(importer: Box<dyn TrainingDataImporter>) -> Self {
        Self { importer }
    }

    pub fn importer(&self) -> &dyn TrainingDataImporter {
        self.importer.as_ref()
    }
}

#[async_trait]
impl TrainingDataImporter for RetrievalIntentImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        self.importer.get_config().await
    }

    async fn get_domain(&self) -> Result<Domain> {
        let (domain, nlu_data) =
            futures::try_join!(self.importer.get_domain(), self.importer.get_nlu_data())?;
        Ok(reconcile(domain, &nlu_data))
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        self.importer.get_stories().await
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        self.importer.get_nlu_data().await
    }

    fn name(&self) -> &str {
        "RetrievalIntentImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::RetrievalIntents
    }

    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        vec![self.importer.as_ref()]
    }
}

/// Update a domain from NLU data
///
/// - intents used with a response key are flagged as retrieval intents
/// - NLU responses replace domain templates of the same name
/// - every retrieval intent gets an `utter_<intent>` action
pub fn reconcile(domain: Domain, nlu_data: &TrainingData) -> Domain {
    let mut domain = nlu_data
        .retrieval_intents()
        .into_iter()
        .fold(domain, |domain, intent| {
            domain.with_intent(intent, IntentProperties::retrieval())
        });

    for (name, variants) in &nlu_data.responses {
        domain.templates.insert(name.clone(), variants.clone());
    }

    let actions = domain.retrieval_action_names();
    tracing::debug!(
        retrieval_intents = actions.len(),
        responses = nlu_data.responses.len(),
        "Reconciled retrieval intents"
    );
    domain.add_actions(actions);

    domain
}
