//! Training configuration mapping

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fingerprint::fingerprint;

/// Unordered key/value mapping read from a training configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingConfig {
    entries: Map<String, Value>,
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed document; anything but a mapping is rejected
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(entries) => Some(Self { entries }),
            Value::Null => Some(Self::default()),
            _ => None,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Stable content hash
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}

impl From<Map<String, Value>> for TrainingConfig {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}
