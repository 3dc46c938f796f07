//! Response templates shared by the domain and NLU training data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response name (e.g. `utter_greet` or `utter_chitchat/ask_name`) to variants
pub type Responses = BTreeMap<String, Vec<ResponseVariant>>;

/// One variant of a bot response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    /// Restrict the variant to an output channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Channel specific payload passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Value>,
}

impl ResponseVariant {
    /// Create a text-only variant
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Quick reply button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(default)]
    pub payload: String,
}

/// Union two response mappings
///
/// Keys from both sides are kept. For a key present on both sides the
/// variants are unioned, first-seen order, without duplicates.
pub fn merge_responses(left: &Responses, right: &Responses) -> Responses {
    let mut merged = left.clone();
    for (name, variants) in right {
        let entry = merged.entry(name.clone()).or_default();
        for variant in variants {
            if !entry.contains(variant) {
                entry.push(variant.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_unions_keys_and_variants() {
        let mut left = Responses::new();
        left.insert("utter_greet".into(), vec![ResponseVariant::text("Hey!")]);

        let mut right = Responses::new();
        right.insert(
            "utter_greet".into(),
            vec![ResponseVariant::text("Hey!"), ResponseVariant::text("Hello!")],
        );
        right.insert("utter_bye".into(), vec![ResponseVariant::text("Bye")]);

        let merged = merge_responses(&left, &right);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged["utter_greet"],
            vec![ResponseVariant::text("Hey!"), ResponseVariant::text("Hello!")]
        );
    }

    #[test]
    fn test_variant_deserializes_from_yaml_shape() {
        let variant: ResponseVariant = serde_json::from_value(serde_json::json!({
            "text": "Pick one",
            "buttons": [{"title": "yes", "payload": "/affirm"}]
        }))
        .unwrap();
        assert_eq!(variant.buttons.len(), 1);
        assert_eq!(variant.channel, None);
    }
}
