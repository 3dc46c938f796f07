//! Importer specifications of a training configuration

use dialogue_data_core::TrainingConfig;
use serde_json::{Map, Value};

use crate::constants::keys;

/// One entry of the `importers:` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImporterSpec {
    /// Short or fully-qualified importer name
    pub name: String,
    /// Remaining keys of the entry, passed to the importer
    pub params: Map<String, Value>,
}

impl ImporterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Map::new(),
        }
    }

    /// String parameter
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Importer specifications declared in a training config
///
/// Entries that are not mappings or lack a `name` are skipped with a warning.
pub fn importer_specs(config: &TrainingConfig) -> Vec<ImporterSpec> {
    let entries = match config.get(keys::IMPORTERS) {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return Vec::new(),
        Some(other) => {
            tracing::warn!(value = %other, "Ignoring 'importers', expected a list");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| {
            let mut params = match entry {
                Value::Object(map) => map.clone(),
                other => {
                    tracing::warn!(entry = %other, "Ignoring importer entry, expected a mapping");
                    return None;
                }
            };

            match params.remove(keys::IMPORTER_NAME) {
                Some(Value::String(name)) => Some(ImporterSpec { name, params }),
                _ => {
                    tracing::warn!(entry = %entry, "Ignoring importer entry without a name");
                    None
                }
            }
        })
        .collect()
}
