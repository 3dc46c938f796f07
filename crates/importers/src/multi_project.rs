//! Importer for projects composed of sub-projects
//!
//! The root training config lists sub-projects under `imports`. Each
//! imported directory is walked; nested `config.yml` files may import
//! further projects.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dialogue_data_config::constants::{keys, paths};
use dialogue_data_config::{is_yaml_file, ImportSettings};
use dialogue_data_core::{
    DataLoadError, Domain, ImporterKind, Result, StoryGraph, TrainingConfig, TrainingData,
    TrainingDataImporter,
};
use serde_json::Value;

use crate::reader::{self, canonical, exists, list_files};

/// Parameter naming the root project directory
pub const PROJECT_DIRECTORY_PARAM: &str = "project_directory";

/// Files picked up from the imported projects
#[derive(Debug, Default)]
struct ProjectLayout {
    domain_paths: Vec<PathBuf>,
    training_files: Vec<PathBuf>,
}

/// Merges the root project with every project it imports
#[derive(Debug, Clone)]
pub struct MultiProjectImporter {
    settings: ImportSettings,
    project_directory: PathBuf,
}

impl MultiProjectImporter {
    /// Create an importer; without a project directory the config's
    /// directory is the root
    pub fn new(settings: ImportSettings, project_directory: Option<PathBuf>) -> Self {
        let project_directory = project_directory
            .or_else(|| {
                settings
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            settings,
            project_directory,
        }
    }

    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    async fn root_config(&self) -> Result<TrainingConfig> {
        reader::read_optional_training_config(self.settings.config_path.as_deref()).await
    }

    /// Walk the imported projects
    async fn layout(&self) -> Result<ProjectLayout> {
        let root_config_path = match &self.settings.config_path {
            Some(path) => Some(canonical(path).await),
            None => None,
        };
        let mut queue: VecDeque<PathBuf> =
            import_paths(&self.root_config().await?, &self.project_directory).into();
        if queue.is_empty() {
            queue.push_back(self.project_directory.clone());
        }

        let mut imported: Vec<PathBuf> = Vec::new();
        let mut layout = ProjectLayout::default();

        while let Some(path) = queue.pop_front() {
            let path = canonical(&path).await;
            if imported.contains(&path) {
                continue;
            }
            if !exists(&path).await {
                return Err(DataLoadError::NotFound(path.display().to_string()));
            }
            tracing::debug!(path = %path.display(), "Importing project");
            imported.push(path.clone());

            for file in list_files(&path).await? {
                if !is_yaml_file(&file) {
                    continue;
                }
                let file = canonical(&file).await;

                if is_config_file(&file) {
                    if root_config_path.as_ref() == Some(&file) {
                        continue;
                    }
                    let nested = reader::read_training_config(&file).await?;
                    let base = file.parent().unwrap_or(&path);
                    queue.extend(import_paths(&nested, base));
                } else if is_domain_file(&file) {
                    push_unique(&mut layout.domain_paths, file);
                } else {
                    push_unique(&mut layout.training_files, file);
                }
            }
        }

        if let Some(domain_path) = &self.settings.domain_path {
            let domain_path = canonical(domain_path).await;
            if exists(&domain_path).await && is_imported(&imported, &domain_path) {
                push_unique(&mut layout.domain_paths, domain_path);
            }
        }

        let mut explicit = Vec::new();
        for path in &self.settings.training_data_paths {
            let path = canonical(path).await;
            if is_imported(&imported, &path) {
                explicit.push(path);
            }
        }
        for file in reader::collect_training_files(&explicit).await? {
            push_unique(&mut layout.training_files, canonical(&file).await);
        }

        tracing::debug!(
            projects = imported.len(),
            domains = layout.domain_paths.len(),
            training_files = layout.training_files.len(),
            "Resolved project imports"
        );

        Ok(layout)
    }
}

#[async_trait]
impl TrainingDataImporter for MultiProjectImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        self.root_config().await
    }

    async fn get_domain(&self) -> Result<Domain> {
        let layout = self.layout().await?;
        let mut domain = Domain::empty();
        for path in &layout.domain_paths {
            domain = domain.merge(&reader::read_domain(path).await?);
        }
        Ok(domain)
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        let layout = self.layout().await?;
        Ok(reader::read_training_data(&layout.training_files).await?.stories)
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        let layout = self.layout().await?;
        Ok(reader::read_training_data(&layout.training_files).await?.nlu)
    }

    fn name(&self) -> &str {
        "MultiProjectImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::MultiProject
    }
}

/// `imports` entries of a config, resolved against `base`
fn import_paths(config: &TrainingConfig, base: &Path) -> Vec<PathBuf> {
    match config.get(keys::IMPORTS) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(path) => Some(base.join(path)),
                other => {
                    tracing::warn!(entry = %other, "Ignoring import, expected a path");
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(value = %other, "Ignoring 'imports', expected a list");
            Vec::new()
        }
    }
}

fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| paths::CONFIG_FILE_NAMES.contains(&name))
}

fn is_domain_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map_or(false, |stem| stem.starts_with(paths::DOMAIN_FILE_PREFIX))
}

/// `path` must already be canonical
fn is_imported(imported: &[PathBuf], path: &Path) -> bool {
    imported.iter().any(|dir| path.starts_with(dir))
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_file_classification() {
        assert!(is_config_file(Path::new("bot/config.yml")));
        assert!(!is_config_file(Path::new("bot/configs.yml")));
        assert!(is_domain_file(Path::new("bot/domain.yml")));
        assert!(is_domain_file(Path::new("bot/domain_faq.yaml")));
        assert!(!is_domain_file(Path::new("bot/data/nlu.yml")));
    }

    #[test]
    fn test_project_directory_defaults_to_config_dir() {
        let importer = MultiProjectImporter::new(
            ImportSettings::empty().with_config_path("bots/root/config.yml"),
            None,
        );
        assert_eq!(importer.project_directory(), Path::new("bots/root"));

        let importer =
            MultiProjectImporter::new(ImportSettings::empty().with_config_path("config.yml"), None);
        assert_eq!(importer.project_directory(), Path::new("."));
    }

    #[tokio::test]
    async fn test_imports_are_followed() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(&root.join("config.yml"), "language: en\nimports:\n- skill-a\n- skill-b\n");
        write(&root.join("unrelated/data/nlu.yml"), "nlu:\n- intent: unrelated\n  examples: |\n    - no\n");
        write(&root.join("skill-a/domain.yml"), "intents: [greet]\n");
        write(&root.join("skill-a/data/nlu.yml"), "nlu:\n- intent: greet\n  examples: |\n    - hi\n");
        write(&root.join("skill-b/config.yml"), "imports:\n- ../skill-c\n");
        write(&root.join("skill-b/domain.yml"), "intents: [goodbye]\n");
        write(
            &root.join("skill-c/data/stories.yml"),
            "stories:\n- story: bye\n  steps:\n  - intent: goodbye\n  - action: utter_goodbye\n",
        );

        let importer = MultiProjectImporter::new(
            ImportSettings::for_project(root),
            Some(root.to_path_buf()),
        );

        let config = importer.get_config().await.unwrap();
        assert_eq!(config.get("language"), Some(&Value::from("en")));

        let domain = importer.get_domain().await.unwrap();
        let intents: Vec<&str> = domain.intent_names().collect();
        assert_eq!(intents, vec!["goodbye", "greet"]);

        let nlu = importer.get_nlu_data().await.unwrap();
        assert!(nlu.intents().contains("greet"));
        assert!(!nlu.intents().contains("unrelated"));

        assert_eq!(importer.get_stories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_root_imported_without_imports() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(&root.join("config.yml"), "language: en\n");
        write(&root.join("domain.yml"), "intents: [greet]\n");
        write(&root.join("data/nlu.yml"), "nlu:\n- intent: greet\n  examples: |\n    - hi\n");

        let importer = MultiProjectImporter::new(ImportSettings::for_project(root), None);

        assert_eq!(importer.get_domain().await.unwrap().intents.len(), 1);
        assert_eq!(importer.get_nlu_data().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cyclic_imports_terminate() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(&root.join("config.yml"), "imports:\n- a\n");
        write(&root.join("a/config.yml"), "imports:\n- ../b\n");
        write(&root.join("a/domain.yml"), "intents: [a]\n");
        write(&root.join("b/config.yml"), "imports:\n- ../a\n");
        write(&root.join("b/domain.yml"), "intents: [b]\n");

        let importer = MultiProjectImporter::new(ImportSettings::for_project(root), None);
        assert_eq!(importer.get_domain().await.unwrap().intents.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_import() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("config.yml"), "imports:\n- missing\n");

        let importer = MultiProjectImporter::new(ImportSettings::for_project(dir.path()), None);
        assert!(matches!(
            importer.get_domain().await,
            Err(DataLoadError::NotFound(_))
        ));
    }
}
