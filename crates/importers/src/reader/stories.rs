use dialogue_data_core::{DataLoadError, Event, Result, StepKind, StoryGraph, StoryStep};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::nlu::strip_entity_annotations;

#[derive(Debug, Deserialize)]
pub(super) struct RawStory {
    story: String,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawRule {
    rule: String,
    /// Slot and loop events that must hold before the rule applies
    #[serde(default)]
    condition: Vec<RawStep>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStep {
    #[serde(default)]
    intent: Option<String>,
    /// End-to-end user text
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    action: Option<String>,
    /// End-to-end bot text
    #[serde(default)]
    bot: Option<String>,
    #[serde(default)]
    slot_was_set: Option<Value>,
    /// `Some(None)` is an explicit `active_loop: null`
    #[serde(default, deserialize_with = "present")]
    active_loop: Option<Option<String>>,
    #[serde(default)]
    checkpoint: Option<String>,
}

fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Build a story graph from `stories:` and `rules:` sections
///
/// Stories keep file order and precede rules.
pub(super) fn parse_stories(stories: &[RawStory], rules: &[RawRule], origin: &str) -> Result<StoryGraph> {
    let mut steps = Vec::with_capacity(stories.len() + rules.len());

    for story in stories {
        steps.push(build_step(&story.story, &story.steps, StepKind::Story, origin)?);
    }

    for rule in rules {
        let mut step = build_step(&rule.rule, &rule.steps, StepKind::Rule, origin)?;
        let conditions = rule
            .condition
            .iter()
            .map(|raw| step_events(&rule.rule, raw, origin))
            .collect::<Result<Vec<_>>>()?;
        step.events.splice(0..0, conditions.into_iter().flatten());
        steps.push(step);
    }

    Ok(StoryGraph::new(steps))
}

fn build_step(name: &str, raw_steps: &[RawStep], kind: StepKind, origin: &str) -> Result<StoryStep> {
    let mut step = StoryStep::new(Vec::new()).with_name(name).with_kind(kind);

    for raw in raw_steps {
        if let Some(checkpoint) = &raw.checkpoint {
            if step.events.is_empty() {
                step.start_checkpoints.push(checkpoint.clone());
            } else {
                step.end_checkpoints.push(checkpoint.clone());
            }
            continue;
        }
        step.events.extend(step_events(name, raw, origin)?);
    }

    Ok(step)
}

fn step_events(block: &str, raw: &RawStep, origin: &str) -> Result<Vec<Event>> {
    if raw.intent.is_some() || raw.user.is_some() {
        let text = raw.user.as_deref().map(|user| strip_entity_annotations(user).0);
        return Ok(vec![Event::user_uttered(text.as_deref(), raw.intent.as_deref())]);
    }

    match (&raw.action, &raw.bot) {
        (Some(action), None) => return Ok(vec![Event::action(action.clone())]),
        (name, Some(text)) => return Ok(vec![Event::action_with_text(name.as_deref(), text.clone())]),
        (None, None) => {}
    }

    if let Some(slots) = &raw.slot_was_set {
        return slot_events(block, slots, origin);
    }

    if let Some(active_loop) = &raw.active_loop {
        return Ok(vec![Event::active_loop(active_loop.as_deref())]);
    }

    Err(DataLoadError::invalid(
        origin,
        format!("Step in '{}' has no user, bot, action, slot or loop event", block),
    ))
}

/// `slot_was_set` accepts a list of names or `{name: value}` maps, or a single map
fn slot_events(block: &str, slots: &Value, origin: &str) -> Result<Vec<Event>> {
    let entries = match slots {
        Value::Array(entries) => entries.as_slice(),
        single => std::slice::from_ref(single),
    };

    let mut events = Vec::new();
    for entry in entries {
        match entry {
            Value::String(name) => events.push(Event::slot_set(name.clone(), Value::Null)),
            Value::Object(map) => {
                events.extend(map.iter().map(|(key, value)| Event::slot_set(key.clone(), value.clone())))
            }
            other => {
                return Err(DataLoadError::invalid(
                    origin,
                    format!("Invalid slot_was_set entry in '{}': {}", block, other),
                ))
            }
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sections {
        #[serde(default)]
        stories: Vec<RawStory>,
        #[serde(default)]
        rules: Vec<RawRule>,
    }

    fn parse(yaml: &str) -> Result<StoryGraph> {
        let sections: Sections = serde_yaml::from_str(yaml).unwrap();
        parse_stories(&sections.stories, &sections.rules, "stories.yml")
    }

    #[test]
    fn test_story_events() {
        let graph = parse(
            r#"
stories:
- story: e2e
  steps:
  - checkpoint: start
  - user: hello
    intent: greet
  - bot: Hi Joey.
  - action: utter_greet
  - slot_was_set:
    - name: Joey
    - confirmed
  - active_loop: booking_form
  - active_loop: null
  - checkpoint: end
"#,
        )
        .unwrap();

        let step = &graph.story_steps[0];
        assert_eq!(step.block_name, "e2e");
        assert_eq!(step.start_checkpoints, vec!["start"]);
        assert_eq!(step.end_checkpoints, vec!["end"]);
        assert_eq!(
            step.events,
            vec![
                Event::user_uttered(Some("hello"), Some("greet")),
                Event::action_with_text(None, "Hi Joey."),
                Event::action("utter_greet"),
                Event::slot_set("name", json!("Joey")),
                Event::slot_set("confirmed", Value::Null),
                Event::active_loop(Some("booking_form")),
                Event::active_loop(None),
            ]
        );
    }

    #[test]
    fn test_rules_follow_stories() {
        let graph = parse(
            r#"
rules:
- rule: say goodbye
  condition:
  - active_loop: null
  steps:
  - intent: goodbye
  - action: utter_goodbye
stories:
- story: greet
  steps:
  - intent: greet
"#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert!(!graph.story_steps[0].is_rule());
        let rule = &graph.story_steps[1];
        assert!(rule.is_rule());
        assert_eq!(rule.events[0], Event::active_loop(None));
        assert_eq!(rule.events.len(), 3);
    }

    #[test]
    fn test_user_text_drops_entity_markup() {
        let graph = parse(
            "stories:\n- story: e2e\n  steps:\n  - user: I live in [Berlin](city)\n",
        )
        .unwrap();

        assert_eq!(
            graph.story_steps[0].events,
            vec![Event::user_uttered(Some("I live in Berlin"), None)]
        );
    }

    #[test]
    fn test_empty_step_is_invalid() {
        let result = parse("stories:\n- story: broken\n  steps:\n  - {}\n");
        assert!(matches!(result, Err(DataLoadError::InvalidFormat { .. })));
    }
}
