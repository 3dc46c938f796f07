//! NLU training messages
//!
//! A `Message` is an immutable mapping from a fixed set of keys to JSON
//! values. Two messages are equal iff their mappings are equal, which is
//! what training data merging uses for deduplication.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys a message may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// User text
    Text,
    /// Intent annotated in NLU files
    Intent,
    /// Intent name attached to a user utterance taken from stories
    IntentName,
    /// Full `intent/response_key` of a retrieval intent example
    IntentResponseKey,
    /// Response text for retrieval examples
    Response,
    /// Name of an executed action
    ActionName,
    /// Bot text of an end-to-end action
    ActionText,
    /// Entity annotations
    Entities,
    /// Free-form metadata
    Metadata,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Intent => "intent",
            Self::IntentName => "intent_name",
            Self::IntentResponseKey => "intent_response_key",
            Self::Response => "response",
            Self::ActionName => "action_name",
            Self::ActionText => "action_text",
            Self::Entities => "entities",
            Self::Metadata => "metadata",
        }
    }
}

/// A single training example
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message {
    data: BTreeMap<MessageKey, Value>,
}

impl Message {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this message with `key` set to `value`
    pub fn with(mut self, key: MessageKey, value: impl Into<Value>) -> Self {
        self.data.insert(key, value.into());
        self
    }

    /// Message derived from a user utterance in a story
    ///
    /// Both keys are always present; absent values are `null`.
    pub fn user_utterance(text: Option<&str>, intent: Option<&str>) -> Self {
        Self::new()
            .with(MessageKey::Text, optional_string(text))
            .with(MessageKey::IntentName, optional_string(intent))
    }

    /// Message derived from an executed action
    ///
    /// A missing action text is recorded as the empty string.
    pub fn action(action_name: Option<&str>, action_text: Option<&str>) -> Self {
        Self::new()
            .with(MessageKey::ActionName, optional_string(action_name))
            .with(MessageKey::ActionText, action_text.unwrap_or(""))
    }

    /// Raw value for a key
    pub fn get(&self, key: MessageKey) -> Option<&Value> {
        self.data.get(&key)
    }

    /// String value for a key (`None` for missing, `null` or non-string values)
    pub fn get_str(&self, key: MessageKey) -> Option<&str> {
        self.data.get(&key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: MessageKey) -> bool {
        self.data.contains_key(&key)
    }

    pub fn text(&self) -> Option<&str> {
        self.get_str(MessageKey::Text)
    }

    /// Intent of the example, from either intent key
    pub fn intent(&self) -> Option<&str> {
        self.get_str(MessageKey::Intent)
            .or_else(|| self.get_str(MessageKey::IntentName))
    }

    pub fn intent_response_key(&self) -> Option<&str> {
        self.get_str(MessageKey::IntentResponseKey)
    }

    pub fn action_name(&self) -> Option<&str> {
        self.get_str(MessageKey::ActionName)
    }

    pub fn action_text(&self) -> Option<&str> {
        self.get_str(MessageKey::ActionText)
    }

    pub fn keys(&self) -> impl Iterator<Item = MessageKey> + '_ {
        self.data.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal JSON values render identically, which keeps Hash consistent with Eq.
        for (key, value) in &self.data {
            key.hash(state);
            value.to_string().hash(state);
        }
    }
}
