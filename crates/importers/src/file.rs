//! Single project importer reading from files

use async_trait::async_trait;
use dialogue_data_config::ImportSettings;
use dialogue_data_core::{
    Domain, ImporterKind, Result, StoryGraph, TrainingConfig, TrainingData, TrainingDataImporter,
};

use crate::reader::{self, TrainingDataFile};

/// Reads config, domain and training data from the configured paths
///
/// Missing files yield empty values.
#[derive(Debug, Clone)]
pub struct FileImporter {
    settings: ImportSettings,
}

impl FileImporter {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    async fn training_data(&self) -> Result<TrainingDataFile> {
        let files = reader::collect_training_files(&self.settings.training_data_paths).await?;
        reader::read_training_data(&files).await
    }
}

#[async_trait]
impl TrainingDataImporter for FileImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        reader::read_optional_training_config(self.settings.config_path.as_deref()).await
    }

    async fn get_domain(&self) -> Result<Domain> {
        match &self.settings.domain_path {
            Some(path) if reader::exists(path).await => reader::read_domain(path).await,
            Some(path) => {
                tracing::warn!(path = %path.display(), "Domain not found, using empty domain");
                Ok(Domain::empty())
            }
            None => Ok(Domain::empty()),
        }
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        Ok(self.training_data().await?.stories)
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        Ok(self.training_data().await?.nlu)
    }

    fn name(&self) -> &str {
        "FileImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_data_core::DataLoadError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_files_yield_empty_values() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        let importer = FileImporter::new(ImportSettings::for_project(dir.path()));

        assert!(importer.get_config().await.unwrap().is_empty());
        assert!(importer.get_domain().await.unwrap().is_empty());
        assert!(importer.get_stories().await.unwrap().is_empty());
        assert!(importer.get_nlu_data().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_training_data_path() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("domain.yml"), "intents: [greet]\n").unwrap();
        let importer = FileImporter::new(ImportSettings::for_project(dir.path()));

        assert_eq!(importer.get_domain().await.unwrap().intents.len(), 1);
        assert!(importer.get_stories().await.unwrap().is_empty());
        assert!(importer.get_nlu_data().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_project() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(dir.path().join("config.yml"), "language: en\n").unwrap();
        std::fs::write(dir.path().join("domain.yml"), "intents: [greet]\n").unwrap();
        std::fs::write(
            data.join("nlu.yml"),
            "nlu:\n- intent: greet\n  examples: |\n    - hi\n",
        )
        .unwrap();
        std::fs::write(
            data.join("stories.yml"),
            "stories:\n- story: s\n  steps:\n  - intent: greet\n  - action: utter_greet\n",
        )
        .unwrap();

        let importer = FileImporter::new(ImportSettings::for_project(dir.path()));

        assert_eq!(importer.get_config().await.unwrap().len(), 1);
        assert_eq!(importer.get_domain().await.unwrap().intents.len(), 1);
        assert_eq!(importer.get_stories().await.unwrap().len(), 1);
        assert_eq!(importer.get_nlu_data().await.unwrap().len(), 1);
        assert_eq!(importer.kind(), ImporterKind::File);
    }

    #[tokio::test]
    async fn test_malformed_domain() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("domain.yml"), "intents: [greet").unwrap();
        let importer = FileImporter::new(ImportSettings::for_project(dir.path()));

        assert!(matches!(
            importer.get_domain().await,
            Err(DataLoadError::Parse { .. })
        ));
    }
}
