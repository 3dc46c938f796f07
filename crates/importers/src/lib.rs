//! Training data importers
//!
//! Leaf importers read projects from disk or memory; wrappers combine,
//! project and enrich them:
//! - `CombinedDataImporter` merges several importers
//! - `NluDataImporter` / `CoreDataImporter` hide entities a pipeline does not use
//! - `RetrievalIntentImporter` syncs retrieval intent responses into the domain
//! - `EndToEndImporter` derives NLU data and actions from stories
//!
//! `ImporterLoader` assembles the chain from a training config.

pub mod combined;
pub mod e2e;
pub mod file;
pub mod loader;
pub mod memory;
pub mod multi_project;
pub mod projection;
pub mod reader;
pub mod registry;
pub mod retrieval;

pub use combined::CombinedDataImporter;
pub use e2e::EndToEndImporter;
pub use file::FileImporter;
pub use loader::{
    load_core_importer, load_from_dict, load_from_settings, load_nlu_importer, ImporterLoader,
};
pub use memory::InMemoryImporter;
pub use multi_project::MultiProjectImporter;
pub use projection::{CoreDataImporter, NluDataImporter};
pub use registry::{ImporterFactory, ImporterRegistry, UnknownImporterError};
pub use retrieval::RetrievalIntentImporter;

pub use dialogue_data_config::ImportSettings;
pub use dialogue_data_core::{DataLoadError, ImporterKind, TrainingDataImporter};
