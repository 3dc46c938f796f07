//! Core traits for the import chain
//!
//! Every importer, leaf or wrapper, implements `TrainingDataImporter`:
//!
//! ```text
//! Leaf importers:      FileImporter, MultiProjectImporter, InMemoryImporter
//! Combining:           CombinedDataImporter (many → one)
//! Projections:         NluDataImporter, CoreDataImporter
//! Enrichment:          RetrievalIntentImporter, EndToEndImporter
//! ```

mod importer;

pub use importer::{ImporterKind, TrainingDataImporter};
