//! End-to-end data synthesis
//!
//! Stories carry user texts and bot actions that never appear in the NLU
//! files or the domain. This importer derives NLU messages and domain
//! actions from them, and adds the default actions every assistant has.

use async_trait::async_trait;
use dialogue_data_core::constants::actions::DEFAULT_ACTION_NAMES;
use dialogue_data_core::{
    Domain, Event, ImporterKind, Message, Result, StoryGraph, TrainingConfig, TrainingData,
    TrainingDataImporter,
};

/// Adds story-derived NLU data and actions to the wrapped importer
pub struct EndToEndImporter {
    importer: Box<dyn TrainingDataImporter>,
}

impl EndToEndImporter {
    pub fn new(importer: Box<dyn TrainingDataImporter>) -> Self {
        Self { importer }
    }

    pub fn importer(&self) -> &dyn TrainingDataImporter {
        self.importer.as_ref()
    }
}

#[async_trait]
impl TrainingDataImporter for EndToEndImporter {
    async fn get_config(&self) -> Result<TrainingConfig> {
        self.importer.get_config().await
    }

    async fn get_domain(&self) -> Result<Domain> {
        let (domain, stories) =
            futures::try_join!(self.importer.get_domain(), self.importer.get_stories())?;

        let mut domain = domain.merge(&story_domain(&stories));
        domain.add_actions(DEFAULT_ACTION_NAMES.iter().map(|name| name.to_string()));
        Ok(domain)
    }

    async fn get_stories(&self) -> Result<StoryGraph> {
        self.importer.get_stories().await
    }

    async fn get_nlu_data(&self) -> Result<TrainingData> {
        let (nlu_data, stories) =
            futures::try_join!(self.importer.get_nlu_data(), self.importer.get_stories())?;

        let synthesized = TrainingData::new(story_messages(&stories));
        let merged = TrainingData::new(default_action_messages())
            .merge(&nlu_data)
            .merge(&synthesized);

        tracing::debug!(
            wrapped = nlu_data.len(),
            synthesized = synthesized.len(),
            total = merged.len(),
            "Added end-to-end training data"
        );
        Ok(merged)
    }

    fn name(&self) -> &str {
        "EndToEndImporter"
    }

    fn kind(&self) -> ImporterKind {
        ImporterKind::EndToEnd
    }

    fn children(&self) -> Vec<&dyn TrainingDataImporter> {
        vec![self.importer.as_ref()]
    }
}

/// One message per default action
pub fn default_action_messages() -> Vec<Message> {
    DEFAULT_ACTION_NAMES
        .iter()
        .copied()
        .map(|name| Message::action(Some(name), None))
        .collect()
}

/// Messages for the user turns and bot actions of every story step
///
/// Action messages come first, sorted by action name (or text); user
/// messages follow, sorted by intent (or text). Duplicates are dropped.
pub fn story_messages(stories: &StoryGraph) -> Vec<Message> {
    let mut actions = Vec::new();
    let mut users = Vec::new();

    for event in stories.events() {
        match event {
            Event::ActionExecuted {
                action_name,
                action_text,
            } => actions.push(Message::action(action_name.as_deref(), action_text.as_deref())),
            Event::UserUttered { text, intent } => {
                users.push(Message::user_utterance(text.as_deref(), intent.as_deref()))
            }
            Event::SlotSet { .. } | Event::ActiveLoop { .. } => {}
        }
    }

    actions.sort_by(|a, b| action_sort_key(a).cmp(&action_sort_key(b)));
    users.sort_by(|a, b| user_sort_key(a).cmp(&user_sort_key(b)));

    TrainingData::new(actions.into_iter().chain(users)).training_examples
}

fn action_sort_key(message: &Message) -> (Option<&str>, Option<&str>) {
    (
        message.action_name().or(message.action_text()),
        message.action_text(),
    )
}

fn user_sort_key(message: &Message) -> (Option<&str>, Option<&str>) {
    (message.intent().or(message.text()), message.text())
}

/// Domain holding the actions executed in stories
///
/// Actions without a name are registered under their bot text.
pub fn story_domain(stories: &StoryGraph) -> Domain {
    let mut names = Vec::new();
    let mut texts = Vec::new();

    for event in stories.events() {
        if let Event::ActionExecuted {
            action_name,
            action_text,
        } = event
        {
            if let Some(name) = action_name.as_ref().or(action_text.as_ref()) {
                names.push(name.clone());
            }
            if let Some(text) = action_text {
                texts.push(text.clone());
            }
        }
    }

    let mut domain = Domain::empty();
    domain.add_actions(names);
    domain.add_action_texts(texts);
    domain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryImporter;
    use dialogue_data_core::{MessageKey, StoryStep};
    use std::collections::HashSet;

    fn graph(events: Vec<Event>) -> StoryGraph {
        StoryGraph::new(vec![StoryStep::new(events)])
    }

    #[test]
    fn test_repeated_action_yields_one_message() {
        let stories = graph(vec![
            Event::action_with_text(Some("X"), "Y"),
            Event::action_with_text(Some("X"), "Y"),
            Event::action_with_text(Some("X"), "Y"),
        ]);

        assert_eq!(story_messages(&stories), vec![Message::action(Some("X"), Some("Y"))]);
    }

    #[test]
    fn test_story_messages() {
        let stories = graph(vec![
            Event::user_uttered(Some("hello"), None),
            Event::action_with_text(None, "Hi Joey."),
            Event::user_uttered(None, Some("greet")),
            Event::action("utter_greet"),
            Event::slot_set("name", "Joey"),
        ]);

        let messages: HashSet<Message> = story_messages(&stories).into_iter().collect();
        let expected: HashSet<Message> = vec![
            Message::user_utterance(Some("hello"), None),
            Message::user_utterance(None, Some("greet")),
            Message::action(None, Some("Hi Joey.")),
            Message::action(Some("utter_greet"), None),
        ]
        .into_iter()
        .collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_story_domain() {
        let stories = graph(vec![
            Event::action_with_text(None, "Hi Joey."),
            Event::action("utter_greet"),
            Event::action("utter_greet"),
        ]);

        let domain = story_domain(&stories);
        assert_eq!(domain.action_names, vec!["Hi Joey.", "utter_greet"]);
        assert_eq!(domain.action_texts, vec!["Hi Joey."]);
    }

    #[tokio::test]
    async fn test_domain_contains_defaults() {
        let importer = EndToEndImporter::new(Box::new(InMemoryImporter::new()));
        let domain = importer.get_domain().await.unwrap();

        for name in DEFAULT_ACTION_NAMES {
            assert!(domain.has_action(name));
        }
    }

    #[tokio::test]
    async fn test_nlu_data_is_superset() {
        let wrapped = TrainingData::new(vec![Message::new()
            .with(MessageKey::Text, "hi")
            .with(MessageKey::Intent, "greet")]);
        let source = InMemoryImporter::new()
            .with_nlu_data(wrapped.clone())
            .with_stories(graph(vec![Event::user_uttered(Some("hi"), Some("greet"))]));
        let importer = EndToEndImporter::new(Box::new(source));

        let nlu_data = importer.get_nlu_data().await.unwrap();
        assert!(nlu_data.len() > wrapped.len());
        assert!(wrapped.training_examples.iter().all(|m| nlu_data.contains(m)));
        for message in default_action_messages() {
            assert!(nlu_data.contains(&message));
        }
        assert!(nlu_data.contains(&Message::user_utterance(Some("hi"), Some("greet"))));
    }
}
