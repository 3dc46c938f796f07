//! Dialogue domain
//!
//! The domain lists what an assistant knows: intents, entities, slots,
//! actions, forms and response templates. Domains from several sources
//! merge by union; conflicting scalar properties take the first
//! non-default value.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::actions::UTTER_PREFIX;
use crate::constants::session::{
    DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION, DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES,
};
use crate::fingerprint::fingerprint;
use crate::responses::{merge_responses, ResponseVariant, Responses};

/// Per-intent properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentProperties {
    /// Response is selected from `intent/response_key` variants
    #[serde(default)]
    pub is_retrieval_intent: bool,
    /// Entities featurized for this intent (`None` = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_entities: Option<UseEntities>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_entities: Vec<String>,
}

impl IntentProperties {
    pub fn retrieval() -> Self {
        Self {
            is_retrieval_intent: true,
            ..Default::default()
        }
    }

    /// Combine two property sets, favoring the non-default value
    fn merge(&self, other: &IntentProperties) -> IntentProperties {
        IntentProperties {
            is_retrieval_intent: self.is_retrieval_intent || other.is_retrieval_intent,
            use_entities: self
                .use_entities
                .clone()
                .or_else(|| other.use_entities.clone()),
            ignore_entities: sorted_union(&self.ignore_entities, &other.ignore_entities),
        }
    }
}

/// `use_entities` of an intent: a flag or an explicit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UseEntities {
    /// `true` featurizes every entity, `false` none
    All(bool),
    Only(Vec<String>),
}

/// Slot value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotType {
    Text,
    Bool,
    Categorical {
        #[serde(default)]
        values: Vec<String>,
    },
    Float {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
    },
    List,
    #[serde(alias = "unfeaturized")]
    Any,
}

/// Slot definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(flatten)]
    pub slot_type: SlotType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    #[serde(default = "default_true")]
    pub influence_conversation: bool,
}

fn default_true() -> bool {
    true
}

impl Slot {
    pub fn new(slot_type: SlotType) -> Self {
        Self {
            slot_type,
            initial_value: None,
            influence_conversation: true,
        }
    }
}

/// Conversation session behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minutes of inactivity after which a new session starts
    #[serde(default = "default_session_expiration")]
    pub session_expiration_time: f64,
    #[serde(default = "default_carry_over_slots", rename = "carry_over_slots_to_new_session")]
    pub carry_over_slots: bool,
}

fn default_session_expiration() -> f64 {
    DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES
}

fn default_carry_over_slots() -> bool {
    DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_expiration_time: default_session_expiration(),
            carry_over_slots: default_carry_over_slots(),
        }
    }
}

impl SessionConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Dialogue domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub intents: BTreeMap<String, IntentProperties>,
    /// Sorted, unique
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
    /// Response templates by utterance name
    #[serde(default)]
    pub templates: Responses,
    /// Registered actions, sorted and unique
    #[serde(default)]
    pub action_names: Vec<String>,
    #[serde(default)]
    pub forms: BTreeMap<String, Value>,
    /// Bot texts of end-to-end actions, sorted and unique
    #[serde(default)]
    pub action_texts: Vec<String>,
    #[serde(default)]
    pub session_config: SessionConfig,
}

impl Domain {
    /// A domain without any content
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the domain carries no user-defined content
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
            && self.entities.is_empty()
            && self.slots.is_empty()
            && self.templates.is_empty()
            && self.action_names.is_empty()
            && self.forms.is_empty()
            && self.action_texts.is_empty()
            && self.session_config.is_default()
    }

    pub fn with_intent(mut self, name: impl Into<String>, properties: IntentProperties) -> Self {
        let name = name.into();
        let merged = match self.intents.get(&name) {
            Some(existing) => existing.merge(&properties),
            None => properties,
        };
        self.intents.insert(name, merged);
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entities = sorted_union(&self.entities, &[entity.into()]);
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.slots.entry(name.into()).or_insert(slot);
        self
    }

    pub fn with_template(mut self, name: impl Into<String>, variants: Vec<ResponseVariant>) -> Self {
        self.templates.insert(name.into(), variants);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.add_actions([action.into()]);
        self
    }

    pub fn with_form(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.forms.entry(name.into()).or_insert(definition);
        self
    }

    /// Add action names that are not registered yet
    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = String>) {
        let new: Vec<String> = actions.into_iter().collect();
        self.action_names = sorted_union(&self.action_names, &new);
    }

    /// Add end-to-end bot texts that are not registered yet
    pub fn add_action_texts(&mut self, texts: impl IntoIterator<Item = String>) {
        let new: Vec<String> = texts.into_iter().collect();
        self.action_texts = sorted_union(&self.action_texts, &new);
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.action_names.iter().any(|a| a == action)
    }

    pub fn intent_properties(&self, intent: &str) -> Option<&IntentProperties> {
        self.intents.get(intent)
    }

    pub fn intent_names(&self) -> impl Iterator<Item = &str> {
        self.intents.keys().map(String::as_str)
    }

    /// Intents flagged `is_retrieval_intent`, sorted
    pub fn retrieval_intents(&self) -> Vec<String> {
        self.intents
            .iter()
            .filter(|(_, props)| props.is_retrieval_intent)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// `utter_<intent>` for every retrieval intent
    pub fn retrieval_action_names(&self) -> Vec<String> {
        self.retrieval_intents()
            .into_iter()
            .map(|intent| format!("{}{}", UTTER_PREFIX, intent))
            .collect()
    }

    /// Union with another domain
    ///
    /// Collections are unioned; for conflicts the first non-default value
    /// wins (intent retrieval flags are OR-ed, slots/forms keep the first
    /// definition, templates union their variants).
    pub fn merge(&self, other: &Domain) -> Domain {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut intents = self.intents.clone();
        for (name, properties) in &other.intents {
            let merged = match intents.get(name) {
                Some(existing) => existing.merge(properties),
                None => properties.clone(),
            };
            intents.insert(name.clone(), merged);
        }

        let mut slots = self.slots.clone();
        for (name, slot) in &other.slots {
            slots.entry(name.clone()).or_insert_with(|| slot.clone());
        }

        let mut forms = self.forms.clone();
        for (name, form) in &other.forms {
            forms.entry(name.clone()).or_insert_with(|| form.clone());
        }

        // Forms are actions in their own right; keep them out of the action list.
        let action_names: Vec<String> = sorted_union(&self.action_names, &other.action_names)
            .into_iter()
            .filter(|a| !forms.contains_key(a))
            .collect();

        let session_config = if self.session_config.is_default() {
            other.session_config.clone()
        } else {
            self.session_config.clone()
        };

        Domain {
            intents,
            entities: sorted_union(&self.entities, &other.entities),
            slots,
            templates: merge_responses(&self.templates, &other.templates),
            action_names,
            forms,
            action_texts: sorted_union(&self.action_texts, &other.action_texts),
            session_config,
        }
    }

    /// Stable content hash
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}

fn sorted_union(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .chain(right.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
