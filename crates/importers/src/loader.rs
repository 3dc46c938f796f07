//! Composition root
//!
//! Builds the importer chain for a project:
//!
//! ```text
//! EndToEndImporter
//!   └─ RetrievalIntentImporter
//!        └─ CombinedDataImporter
//!             ├─ FileImporter
//!             └─ ...
//! ```
//!
//! Leaf importers come from the `importers` list of the training config.

use std::sync::Arc;

use dialogue_data_config::{importer_specs, ImportSettings};
use dialogue_data_core::{Result, TrainingConfig, TrainingDataImporter};
use once_cell::sync::Lazy;

use crate::combined::CombinedDataImporter;
use crate::e2e::EndToEndImporter;
use crate::file::FileImporter;
use crate::projection::{CoreDataImporter, NluDataImporter};
use crate::reader;
use crate::registry::ImporterRegistry;
use crate::retrieval::RetrievalIntentImporter;

static DEFAULT_REGISTRY: Lazy<Arc<ImporterRegistry>> =
    Lazy::new(|| Arc::new(ImporterRegistry::new()));

/// Builds importer chains from training configs
#[derive(Clone)]
pub struct ImporterLoader {
    registry: Arc<ImporterRegistry>,
}

impl Default for ImporterLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImporterLoader {
    /// Loader using the built-in importers
    pub fn new() -> Self {
        Self {
            registry: Arc::clone(&DEFAULT_REGISTRY),
        }
    }

    /// Loader using a custom registry (e.g. with plugins)
    pub fn with_registry(registry: ImporterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ImporterRegistry {
        &self.registry
    }

    /// Full chain for the training config at `settings.config_path`
    pub async fn load_from_settings(&self, settings: &ImportSettings) -> Result<EndToEndImporter> {
        let config = read_config(settings).await?;
        Ok(self.load_from_dict(&config, settings))
    }

    /// Full chain for an already loaded training config
    pub fn load_from_dict(&self, config: &TrainingConfig, settings: &ImportSettings) -> EndToEndImporter {
        let combined = self.combined(config, settings);
        EndToEndImporter::new(Box::new(RetrievalIntentImporter::new(Box::new(combined))))
    }

    /// NLU-only view, without story-derived data
    pub async fn load_nlu_importer(&self, settings: &ImportSettings) -> Result<NluDataImporter> {
        let config = read_config(settings).await?;
        let combined = self.combined(&config, settings);
        Ok(NluDataImporter::new(Box::new(RetrievalIntentImporter::new(
            Box::new(combined),
        ))))
    }

    /// Dialogue-only view of the full chain
    pub async fn load_core_importer(&self, settings: &ImportSettings) -> Result<CoreDataImporter> {
        let importer = self.load_from_settings(settings).await?;
        Ok(CoreDataImporter::new(Box::new(importer)))
    }

    /// Resolve the configured leaf importers
    ///
    /// Unknown names are skipped; with nothing left a `FileImporter`
    /// reads the settings' paths.
    fn combined(&self, config: &TrainingConfig, settings: &ImportSettings) -> CombinedDataImporter {
        let mut importers: Vec<Box<dyn TrainingDataImporter>> = Vec::new();

        for spec in importer_specs(config) {
            match self.registry.resolve(&spec, settings) {
                Ok(importer) => importers.push(importer),
                Err(e) => tracing::warn!(error = %e, "Skipping importer"),
            }
        }

        if importers.is_empty() {
            importers.push(Box::new(FileImporter::new(settings.clone())));
        }

        tracing::info!(
            importers = ?importers.iter().map(|i| i.name()).collect::<Vec<_>>(),
            "Loaded importer chain"
        );

        CombinedDataImporter::new(importers)
    }
}

async fn read_config(settings: &ImportSettings) -> Result<TrainingConfig> {
    reader::read_optional_training_config(settings.config_path.as_deref()).await
}

/// Full chain using the built-in importers
pub async fn load_from_settings(settings: &ImportSettings) -> Result<EndToEndImporter> {
    ImporterLoader::new().load_from_settings(settings).await
}

/// Full chain for a loaded config using the built-in importers
pub fn load_from_dict(config: &TrainingConfig, settings: &ImportSettings) -> EndToEndImporter {
    ImporterLoader::new().load_from_dict(config, settings)
}

/// NLU-only view using the built-in importers
pub async fn load_nlu_importer(settings: &ImportSettings) -> Result<NluDataImporter> {
    ImporterLoader::new().load_nlu_importer(settings).await
}

/// Dialogue-only view using the built-in importers
pub async fn load_core_importer(settings: &ImportSettings) -> Result<CoreDataImporter> {
    ImporterLoader::new().load_core_importer(settings).await
}
