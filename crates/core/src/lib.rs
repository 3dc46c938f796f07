//! Core types for conversational training data
//!
//! This crate provides the entity model moved through the import chain:
//! - Training configuration (free-form key/value mapping)
//! - Dialogue domain (intents, slots, actions, response templates)
//! - Story graphs (dialogue events grouped into story and rule steps)
//! - NLU training data (messages, responses, synonyms, lookups)
//! - The `TrainingDataImporter` trait every importer implements
//! - Error types

pub mod constants;
pub mod domain;
pub mod error;
pub mod message;
pub mod responses;
pub mod story;
pub mod training_config;
pub mod training_data;
pub mod traits;

mod fingerprint;

pub use domain::{Domain, IntentProperties, SessionConfig, Slot, SlotType, UseEntities};
pub use error::{DataLoadError, Result};
pub use message::{Message, MessageKey};
pub use responses::{merge_responses, Button, ResponseVariant, Responses};
pub use story::{Event, StepKind, StoryGraph, StoryStep};
pub use training_config::TrainingConfig;
pub use training_data::{LookupTable, RegexFeature, TrainingData};

pub use traits::{ImporterKind, TrainingDataImporter};
