//! Knowledgebase Module - Varietal Resistance Lookup
//!
//! Maps (variety, pathogen) to a resistance rating. Lookups never fail:
//! anything missing resolves to `ResistanceRating::Unknown` with a note.
//!
//! ## Structure
//! - `types`: ratings and records
//! - `store`: `Knowledgebase` trait and the in-memory implementation
//! - `seed`: built-in screening data
//! - `breeding`: breeding priorities derived from the stored scores

pub mod breeding;
pub mod seed;
pub mod store;
pub mod types;


use std::path::Path;

use crate::logic::error::ConfigError;

pub use breeding::{breeding_recommendations, BreedingPriority, BreedingRecommendation};
pub use seed::seeded;
pub use store::{InMemoryKnowledgebase, Knowledgebase, KnowledgebaseFile, ProfileEntry, VarietyEntry};
pub use types::{RecordSource, ResistanceRating, ResistanceRecord};

/// Knowledgebase file when one is configured, built-in data otherwise
pub fn load(path: Option<&Path>) -> Result<InMemoryKnowledgebase, ConfigError> {
    match path {
        Some(path) => InMemoryKnowledgebase::from_file(path),
        None => seeded(),
    }
}
