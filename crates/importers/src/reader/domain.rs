use std::collections::BTreeMap;

use dialogue_data_core::{Domain, IntentProperties, Responses, Result, SessionConfig, Slot};
use serde::Deserialize;
use serde_json::Value;

use super::{deserialize, parse_value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIntent {
    Name(String),
    WithProperties(BTreeMap<String, Option<IntentProperties>>),
}

#[derive(Debug, Default, Deserialize)]
struct RawDomain {
    #[serde(default)]
    intents: Vec<RawIntent>,
    #[serde(default)]
    entities: Vec<String>,
    #[serde(default)]
    slots: BTreeMap<String, Slot>,
    #[serde(default, alias = "templates")]
    responses: Responses,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    forms: BTreeMap<String, Value>,
    /// Bot texts that act as actions in end-to-end stories
    #[serde(default)]
    e2e_actions: Vec<String>,
    #[serde(default)]
    session_config: Option<SessionConfig>,
}

/// Parse the text of a domain file
pub fn parse_domain(content: &str, origin: &str) -> Result<Domain> {
    let raw: RawDomain = deserialize(parse_value(content, origin)?, origin)?;

    let mut domain = Domain::empty();
    for intent in raw.intents {
        domain = match intent {
            RawIntent::Name(name) => domain.with_intent(name, IntentProperties::default()),
            RawIntent::WithProperties(map) => map.into_iter().fold(domain, |domain, (name, props)| {
                domain.with_intent(name, props.unwrap_or_default())
            }),
        };
    }
    for entity in raw.entities {
        domain = domain.with_entity(entity);
    }
    for (name, slot) in raw.slots {
        domain = domain.with_slot(name, slot);
    }
    for (name, variants) in raw.responses {
        domain = domain.with_template(name, variants);
    }
    for (name, definition) in raw.forms {
        domain = domain.with_form(name, definition);
    }

    let actions: Vec<String> = raw
        .actions
        .into_iter()
        .filter(|action| !domain.forms.contains_key(action))
        .collect();
    domain.add_actions(actions);
    domain.add_action_texts(raw.e2e_actions);
    if let Some(session_config) = raw.session_config {
        domain.session_config = session_config;
    }

    Ok(domain)
}
