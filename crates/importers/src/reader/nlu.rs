use dialogue_data_core::constants::responses::RESPONSE_IDENTIFIER_DELIMITER;
use dialogue_data_core::{
    DataLoadError, LookupTable, Message, MessageKey, RegexFeature, Result, TrainingData,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

/// `[value](entity)` or `[value](entity:synonym)`
static ENTITY_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<value>[^\]]+)\]\((?P<entity>[^)]+)\)").expect("valid entity regex")
});

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawExamples {
    /// Block scalar of `- example` lines
    Block(String),
    List(Vec<String>),
}

impl RawExamples {
    fn lines(&self) -> Vec<String> {
        match self {
            RawExamples::Block(block) => block
                .lines()
                .filter_map(|line| line.trim().strip_prefix('-'))
                .map(|example| example.trim().to_string())
                .filter(|example| !example.is_empty())
                .collect(),
            RawExamples::List(items) => items
                .iter()
                .map(|example| example.trim().to_string())
                .filter(|example| !example.is_empty())
                .collect(),
        }
    }
}

/// One entry of the `nlu:` list
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawNluItem {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    synonym: Option<String>,
    #[serde(default)]
    regex: Option<String>,
    #[serde(default)]
    lookup: Option<String>,
    #[serde(default)]
    examples: Option<RawExamples>,
}

/// Build training data from the items of an `nlu:` section
pub(super) fn parse_nlu(items: &[RawNluItem], origin: &str) -> Result<TrainingData> {
    let mut examples = Vec::new();
    let mut data = TrainingData::default();

    for item in items {
        let lines = item.examples.as_ref().map(RawExamples::lines).unwrap_or_default();

        if let Some(intent) = &item.intent {
            if lines.is_empty() {
                tracing::warn!(path = %origin, intent = %intent, "Intent has no examples");
            }
            examples.extend(lines.iter().map(|line| example_message(intent, line)));
        } else if let Some(synonym) = &item.synonym {
            for value in lines {
                data = data.with_synonym(value, synonym.clone());
            }
        } else if let Some(name) = &item.regex {
            for pattern in lines {
                data = data.with_regex_feature(RegexFeature {
                    name: name.clone(),
                    pattern,
                });
            }
        } else if let Some(name) = &item.lookup {
            data = data.with_lookup_table(LookupTable {
                name: name.clone(),
                elements: lines,
            });
        } else {
            return Err(DataLoadError::invalid(
                origin,
                "NLU item needs one of 'intent', 'synonym', 'regex' or 'lookup'",
            ));
        }
    }

    let mut training_data = TrainingData::new(examples);
    training_data.entity_synonyms = data.entity_synonyms;
    training_data.regex_features = data.regex_features;
    training_data.lookup_tables = data.lookup_tables;
    Ok(training_data)
}

/// Message for one annotated example of an intent
///
/// `chitchat/ask_name` yields intent `chitchat` with response key
/// `chitchat/ask_name`.
fn example_message(intent: &str, example: &str) -> Message {
    let (text, entities) = strip_entity_annotations(example);

    let mut message = Message::new().with(MessageKey::Text, text);
    message = match intent.split_once(RESPONSE_IDENTIFIER_DELIMITER) {
        Some((base, _)) => message
            .with(MessageKey::Intent, base)
            .with(MessageKey::IntentResponseKey, intent),
        None => message.with(MessageKey::Intent, intent),
    };

    if !entities.is_empty() {
        message = message.with(MessageKey::Entities, entities);
    }
    message
}

/// Remove `[value](entity)` markup, returning plain text and entity spans
///
/// Offsets count characters of the plain text.
pub(super) fn strip_entity_annotations(example: &str) -> (String, Vec<serde_json::Value>) {
    let mut text = String::with_capacity(example.len());
    let mut entities = Vec::new();
    let mut last = 0;

    for caps in ENTITY_ANNOTATION.captures_iter(example) {
        let (Some(whole), Some(value), Some(entity)) =
            (caps.get(0), caps.name("value"), caps.name("entity"))
        else {
            continue;
        };

        text.push_str(&example[last..whole.start()]);
        let start = text.chars().count();
        text.push_str(value.as_str());
        let end = text.chars().count();
        last = whole.end();

        let (entity, canonical) = match entity.as_str().split_once(':') {
            Some((entity, synonym)) => (entity, synonym),
            None => (entity.as_str(), value.as_str()),
        };
        entities.push(json!({
            "start": start,
            "end": end,
            "value": canonical,
            "entity": entity,
        }));
    }

    text.push_str(&example[last..]);
    (text, entities)
}
