//! NLU training data
//!
//! Holds training examples together with retrieval responses, entity
//! synonyms, regex features and lookup tables. Merging is a set union:
//! examples are deduplicated by message equality.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::responses::RESPONSE_IDENTIFIER_DELIMITER;
use crate::fingerprint::fingerprint;
use crate::message::Message;
use crate::responses::{merge_responses, ResponseVariant, Responses};

/// Named regular expression used as an NLU feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexFeature {
    pub name: String,
    pub pattern: String,
}

/// Named list of entity values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTable {
    pub name: String,
    pub elements: Vec<String>,
}

/// NLU training data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    /// Training examples, unique by message equality
    #[serde(default)]
    pub training_examples: Vec<Message>,
    /// Responses for retrieval intents
    #[serde(default)]
    pub responses: Responses,
    /// Entity value to canonical value
    #[serde(default)]
    pub entity_synonyms: BTreeMap<String, String>,
    #[serde(default)]
    pub regex_features: Vec<RegexFeature>,
    #[serde(default)]
    pub lookup_tables: Vec<LookupTable>,
}

impl TrainingData {
    /// Create training data from examples, dropping duplicates
    pub fn new(training_examples: impl IntoIterator<Item = Message>) -> Self {
        Self {
            training_examples: dedup(training_examples),
            ..Default::default()
        }
    }

    /// Set the responses mapping
    pub fn with_responses(mut self, responses: Responses) -> Self {
        self.responses = responses;
        self
    }

    /// Add a single response
    pub fn with_response(mut self, name: impl Into<String>, variants: Vec<ResponseVariant>) -> Self {
        self.responses.insert(name.into(), variants);
        self
    }

    pub fn with_synonym(mut self, value: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.entity_synonyms.insert(value.into(), canonical.into());
        self
    }

    pub fn with_regex_feature(mut self, feature: RegexFeature) -> Self {
        self.regex_features = merge_unique(&self.regex_features, std::slice::from_ref(&feature));
        self
    }

    pub fn with_lookup_table(mut self, table: LookupTable) -> Self {
        self.lookup_tables = merge_lookup_tables(&self.lookup_tables, std::slice::from_ref(&table));
        self
    }

    /// True when there are no examples, responses or auxiliary features
    pub fn is_empty(&self) -> bool {
        self.training_examples.is_empty()
            && self.responses.is_empty()
            && self.entity_synonyms.is_empty()
            && self.regex_features.is_empty()
            && self.lookup_tables.is_empty()
    }

    /// Union with another training data set
    ///
    /// Examples keep first-seen order; synonyms keep the first mapping.
    pub fn merge(&self, other: &TrainingData) -> TrainingData {
        let mut entity_synonyms = self.entity_synonyms.clone();
        for (value, canonical) in &other.entity_synonyms {
            entity_synonyms
                .entry(value.clone())
                .or_insert_with(|| canonical.clone());
        }

        TrainingData {
            training_examples: dedup(
                self.training_examples
                    .iter()
                    .chain(other.training_examples.iter())
                    .cloned(),
            ),
            responses: merge_responses(&self.responses, &other.responses),
            entity_synonyms,
            regex_features: merge_unique(&self.regex_features, &other.regex_features),
            lookup_tables: merge_lookup_tables(&self.lookup_tables, &other.lookup_tables),
        }
    }

    /// All intents used by examples
    pub fn intents(&self) -> BTreeSet<String> {
        self.training_examples
            .iter()
            .filter_map(|m| m.intent())
            .map(str::to_string)
            .collect()
    }

    /// Intents whose examples carry a response key (`intent/response_key`)
    pub fn retrieval_intents(&self) -> BTreeSet<String> {
        self.training_examples
            .iter()
            .filter_map(|m| m.intent_response_key())
            .filter_map(|key| key.split(RESPONSE_IDENTIFIER_DELIMITER).next())
            .filter(|intent| !intent.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, message: &Message) -> bool {
        self.training_examples.contains(message)
    }

    pub fn len(&self) -> usize {
        self.training_examples.len()
    }

    /// Stable content hash
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}

fn dedup(messages: impl IntoIterator<Item = Message>) -> Vec<Message> {
    let mut seen = HashSet::new();
    messages
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

fn merge_unique<T: Clone + PartialEq>(left: &[T], right: &[T]) -> Vec<T> {
    let mut merged = left.to_vec();
    for item in right {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

fn merge_lookup_tables(left: &[LookupTable], right: &[LookupTable]) -> Vec<LookupTable> {
    let mut merged = left.to_vec();
    for table in right {
        match merged.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => {
                existing.elements = merge_unique(&existing.elements, &table.elements);
            }
            None => merged.push(table.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKey;

    fn example(text: &str, intent: &str) -> Message {
        Message::new()
            .with(MessageKey::Text, text)
            .with(MessageKey::Intent, intent)
    }

    #[test]
    fn test_new_deduplicates() {
        let data = TrainingData::new(vec![
            example("hi", "greet"),
            example("hi", "greet"),
            example("bye", "goodbye"),
        ]);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(TrainingData::default().is_empty());
        let data = TrainingData::default()
            .with_response("utter_chitchat/ask_name", vec![ResponseVariant::text("Sara")]);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_merge_is_union() {
        let a = TrainingData::new(vec![example("hi", "greet"), example("bye", "goodbye")])
            .with_synonym("NYC", "New York");
        let b = TrainingData::new(vec![example("hi", "greet"), example("yes", "affirm")])
            .with_synonym("NYC", "Gotham")
            .with_response("utter_faq/ask_rates", vec![ResponseVariant::text("10%")]);

        let merged = a.merge(&b);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.entity_synonyms["NYC"], "New York");
        assert!(merged.responses.contains_key("utter_faq/ask_rates"));

        let reversed = b.merge(&a);
        let left: HashSet<_> = merged.training_examples.iter().collect();
        let right: HashSet<_> = reversed.training_examples.iter().collect();
        assert_eq!(left, right);
        assert_eq!(merged.responses, reversed.responses);
    }

    #[test]
    fn test_lookup_tables_merge_by_name() {
        let a = TrainingData::default().with_lookup_table(LookupTable {
            name: "banks".into(),
            elements: vec!["JPMC".into()],
        });
        let b = TrainingData::default().with_lookup_table(LookupTable {
            name: "banks".into(),
            elements: vec!["JPMC".into(), "Comerica".into()],
        });

        let merged = a.merge(&b);
        assert_eq!(merged.lookup_tables.len(), 1);
        assert_eq!(merged.lookup_tables[0].elements, vec!["JPMC", "Comerica"]);
    }

    #[test]
    fn test_retrieval_intents() {
        let data = TrainingData::new(vec![
            example("what's your name", "chitchat")
                .with(MessageKey::IntentResponseKey, "chitchat/ask_name"),
            example("hi", "greet"),
        ]);
        assert_eq!(data.retrieval_intents().into_iter().collect::<Vec<_>>(), vec!["chitchat"]);
        assert_eq!(data.intents().len(), 2);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = TrainingData::new(vec![example("hi", "greet")]);
        let b = TrainingData::new(vec![example("hi", "greet")]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), TrainingData::default().fingerprint());
    }
}
