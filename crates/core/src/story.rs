//! Dialogue stories
//!
//! A `StoryGraph` is an ordered collection of story and rule steps; each
//! step is an ordered sequence of dialogue events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fingerprint::fingerprint;

/// Dialogue events relevant for training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A slot was filled
    SlotSet { key: String, value: Value },
    /// The user said something
    UserUttered {
        /// Raw text (`None` for intent-only steps)
        #[serde(default)]
        text: Option<String>,
        /// Parsed intent name
        #[serde(default)]
        intent: Option<String>,
    },
    /// The bot ran an action
    ActionExecuted {
        #[serde(default)]
        action_name: Option<String>,
        /// Present when the action was demonstrated as raw bot text
        #[serde(default)]
        action_text: Option<String>,
    },
    /// A form/loop was activated (`None` deactivates)
    ActiveLoop {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Event {
    pub fn slot_set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SlotSet {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn user_uttered(text: Option<&str>, intent: Option<&str>) -> Self {
        Self::UserUttered {
            text: text.map(str::to_string),
            intent: intent.map(str::to_string),
        }
    }

    /// Action invoked by name
    pub fn action(name: impl Into<String>) -> Self {
        Self::ActionExecuted {
            action_name: Some(name.into()),
            action_text: None,
        }
    }

    /// Action demonstrated by bot text, optionally tied to a name
    pub fn action_with_text(name: Option<&str>, text: impl Into<String>) -> Self {
        Self::ActionExecuted {
            action_name: name.map(str::to_string),
            action_text: Some(text.into()),
        }
    }

    pub fn active_loop(name: Option<&str>) -> Self {
        Self::ActiveLoop {
            name: name.map(str::to_string),
        }
    }
}

/// Whether a step came from a story or a rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    #[default]
    Story,
    Rule,
}

/// A block of consecutive events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStep {
    #[serde(default)]
    pub block_name: String,
    #[serde(default)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start_checkpoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub end_checkpoints: Vec<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl StoryStep {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, block_name: impl Into<String>) -> Self {
        self.block_name = block_name.into();
        self
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_rule(&self) -> bool {
        self.kind == StepKind::Rule
    }
}

/// Ordered collection of story steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGraph {
    #[serde(default)]
    pub story_steps: Vec<StoryStep>,
}

impl StoryGraph {
    pub fn new(story_steps: Vec<StoryStep>) -> Self {
        Self { story_steps }
    }

    pub fn is_empty(&self) -> bool {
        self.story_steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.story_steps.len()
    }

    /// Concatenate steps, `self` first
    pub fn merge(&self, other: &StoryGraph) -> StoryGraph {
        let mut story_steps = self.story_steps.clone();
        story_steps.extend(other.story_steps.iter().cloned());
        StoryGraph { story_steps }
    }

    /// Every event of every step, in order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.story_steps.iter().flat_map(|step| step.events.iter())
    }

    pub fn rules(&self) -> impl Iterator<Item = &StoryStep> {
        self.story_steps.iter().filter(|step| step.is_rule())
    }

    /// Stable content hash
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}
