//! Built-in Resistance Data
//!
//! Screening scores (0-10, higher = more resistant) for the varieties the
//! field teams work with. Replaced wholesale by a knowledgebase file when one
//! is configured.

use super::store::{InMemoryKnowledgebase, KnowledgebaseFile, ProfileEntry, VarietyEntry};
use crate::logic::error::ConfigError;
use crate::logic::model::Pathogen;

pub const SEED_VERSION: &str = "seed-1";

/// (variety, description, [blast, sheath blight, bacterial blight])
const SEED: &[(&str, Option<&str>, [f32; 3])] = &[
    ("IR64", Some("High-yielding variety"), [5.5, 6.2, 4.8]),
    ("PSB Rc82", Some("Disease-resistant variety"), [7.2, 7.8, 6.5]),
    ("NSIC Rc222", Some("Modern variety"), [8.1, 7.5, 8.3]),
    ("NSIC Rc216", None, [6.8, 7.1, 5.9]),
];

pub fn seed_file() -> KnowledgebaseFile {
    let varieties = SEED
        .iter()
        .map(|(name, description, scores)| VarietyEntry {
            name: name.to_string(),
            description: description.map(str::to_string),
            default_rating: None,
            default_note: None,
            profiles: Pathogen::KNOWN
                .iter()
                .zip(scores.iter())
                .map(|(pathogen, score)| ProfileEntry {
                    pathogen: *pathogen,
                    rating: None,
                    score: Some(*score),
                    note: None,
                })
                .collect(),
        })
        .collect();

    KnowledgebaseFile {
        version: Some(SEED_VERSION.to_string()),
        varieties,
    }
}

/// Knowledgebase with the built-in data
pub fn seeded() -> Result<InMemoryKnowledgebase, ConfigError> {
    InMemoryKnowledgebase::from_entries(seed_file())
}
