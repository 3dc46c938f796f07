//! Importer Registry
//!
//! Maps importer names from a training config to constructors. Built-in
//! importers resolve by short name (`FileImporter`) or qualified path
//! (`dialogue_data_importers::FileImporter`); external importers are
//! registered separately as plugins under their qualified path.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dialogue_data_config::{ImportSettings, ImporterSpec};
use dialogue_data_core::TrainingDataImporter;
use thiserror::Error;

use crate::file::FileImporter;
use crate::multi_project::{MultiProjectImporter, PROJECT_DIRECTORY_PARAM};

/// Crate path used for qualified built-in names
const CRATE_PATH: &str = "dialogue_data_importers";

/// Constructor for an importer
pub type ImporterFactory =
    Arc<dyn Fn(&ImportSettings, &ImporterSpec) -> Box<dyn TrainingDataImporter> + Send + Sync>;

/// A configured importer name without an implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Importer '{0}' not found")]
pub struct UnknownImporterError(pub String);

/// Importer registry
pub struct ImporterRegistry {
    builtins: HashMap<String, ImporterFactory>,
    plugins: HashMap<String, ImporterFactory>,
}

impl ImporterRegistry {
    /// Create a registry with the built-in importers
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_builtin(
            "FileImporter",
            Arc::new(|settings: &ImportSettings, _spec: &ImporterSpec| {
                Box::new(FileImporter::new(settings.clone())) as Box<dyn TrainingDataImporter>
            }),
        );
        registry.register_builtin(
            "MultiProjectImporter",
            Arc::new(|settings: &ImportSettings, spec: &ImporterSpec| {
                let project_directory = spec.param_str(PROJECT_DIRECTORY_PARAM).map(PathBuf::from);
                Box::new(MultiProjectImporter::new(settings.clone(), project_directory))
                    as Box<dyn TrainingDataImporter>
            }),
        );

        registry
    }

    /// Create a registry without any importers
    pub fn empty() -> Self {
        Self {
            builtins: HashMap::new(),
            plugins: HashMap::new(),
        }
    }

    fn register_builtin(&mut self, name: &str, factory: ImporterFactory) {
        self.builtins.insert(name.to_string(), factory);
    }

    /// Register an external importer under its qualified path
    pub fn register_plugin(&mut self, path: impl Into<String>, factory: ImporterFactory) {
        let path = path.into();
        tracing::debug!(importer = %path, "Registered importer plugin");
        self.plugins.insert(path, factory);
    }

    /// Check if a name resolves
    pub fn has(&self, name: &str) -> bool {
        self.factory(name).is_some()
    }

    /// Build the importer described by `spec`
    pub fn resolve(
        &self,
        spec: &ImporterSpec,
        settings: &ImportSettings,
    ) -> Result<Box<dyn TrainingDataImporter>, UnknownImporterError> {
        let factory = self
            .factory(&spec.name)
            .ok_or_else(|| UnknownImporterError(spec.name.clone()))?;
        Ok(factory(settings, spec))
    }

    /// Names of all resolvable importers
    pub fn importer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .builtins
            .keys()
            .chain(self.plugins.keys())
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn factory(&self, name: &str) -> Option<&ImporterFactory> {
        if let Some(factory) = self.plugins.get(name) {
            return Some(factory);
        }

        let short = match name.rsplit_once("::") {
            Some((CRATE_PATH, short)) => short,
            Some(_) => return None,
            None => name,
        };
        self.builtins.get(short)
    }
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryImporter;
    use dialogue_data_core::ImporterKind;

    #[test]
    fn test_builtin_names() {
        let registry = ImporterRegistry::new();
        let settings = ImportSettings::default();

        for name in ["FileImporter", "dialogue_data_importers::FileImporter"] {
            let importer = registry.resolve(&ImporterSpec::new(name), &settings).unwrap();
            assert_eq!(importer.kind(), ImporterKind::File);
        }

        let importer = registry
            .resolve(&ImporterSpec::new("MultiProjectImporter"), &settings)
            .unwrap();
        assert_eq!(importer.kind(), ImporterKind::MultiProject);
    }

    #[test]
    fn test_unknown_names() {
        let registry = ImporterRegistry::new();
        let settings = ImportSettings::default();

        let err = registry
            .resolve(&ImporterSpec::new("NotAnImporter"), &settings)
            .err();
        assert_eq!(err, Some(UnknownImporterError("NotAnImporter".to_string())));

        assert!(!registry.has("other_crate::FileImporter"));
        assert!(!ImporterRegistry::empty().has("FileImporter"));
    }

    #[test]
    fn test_plugins() {
        let mut registry = ImporterRegistry::new();
        registry.register_plugin(
            "my_bot::importers::StaticImporter",
            Arc::new(|_: &ImportSettings, spec: &ImporterSpec| {
                Box::new(InMemoryImporter::new().with_name(spec.name.clone()))
                    as Box<dyn TrainingDataImporter>
            }),
        );

        let importer = registry
            .resolve(
                &ImporterSpec::new("my_bot::importers::StaticImporter"),
                &ImportSettings::empty(),
            )
            .unwrap();
        assert_eq!(importer.name(), "my_bot::importers::StaticImporter");
        assert!(!registry.has("StaticImporter"));
        assert_eq!(registry.importer_names().len(), 3);
    }
}
