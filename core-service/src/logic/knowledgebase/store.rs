//! Resistance Knowledgebase Store
//!
//! Read-only (variety, pathogen) → resistance mapping.
//! Built once at startup, shared behind `Arc<dyn Knowledgebase>` and read
//! concurrently without locks.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{RecordSource, ResistanceRating, ResistanceRecord};
use crate::logic::error::ConfigError;
use crate::logic::model::Pathogen;

// ============================================================================
// KNOWLEDGEBASE TRAIT
// ============================================================================

/// Read-only resistance lookup
pub trait Knowledgebase: Send + Sync {
    /// Resolve resistance for a pair. Never fails; degrades to `Unknown`.
    fn lookup(&self, variety: &str, pathogen: Pathogen) -> ResistanceRecord;

    /// Display names of all varieties
    fn varieties(&self) -> Vec<String>;

    /// Every exact profile, for analytics
    fn profiles(&self) -> Vec<ResistanceRecord>;
}

// ============================================================================
// FILE FORMAT
// ============================================================================

/// On-disk knowledgebase (JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgebaseFile {
    #[serde(default)]
    pub version: Option<String>,
    pub varieties: Vec<VarietyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarietyEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Rating used when no exact profile exists for a pathogen
    #[serde(default)]
    pub default_rating: Option<ResistanceRating>,
    #[serde(default)]
    pub default_note: Option<String>,
    #[serde(default)]
    pub profiles: Vec<ProfileEntry>,
}

/// One (variety, pathogen) profile. Needs a rating, a score, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub pathogen: Pathogen,
    #[serde(default)]
    pub rating: Option<ResistanceRating>,
    /// 0-10 screening score
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub note: Option<String>,
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Clone)]
struct Profile {
    rating: ResistanceRating,
    score: Option<f32>,
    note: String,
}

#[derive(Debug, Clone)]
struct Variety {
    name: String,
    default: Option<(ResistanceRating, String)>,
    profiles: BTreeMap<Pathogen, Profile>,
}

/// Default knowledgebase implementation
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgebase {
    version: Option<String>,
    varieties: BTreeMap<String, Variety>,
}

/// Lookup key: trimmed, lowercased, internal whitespace collapsed
pub fn variety_key(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

impl InMemoryKnowledgebase {
    /// Build and validate from file contents
    pub fn from_entries(file: KnowledgebaseFile) -> Result<Self, ConfigError> {
        let mut varieties = BTreeMap::new();

        for entry in file.varieties {
            let key = variety_key(&entry.name);
            if key.is_empty() {
                return Err(ConfigError::Knowledgebase("variety with empty name".to_string()));
            }
            if varieties.contains_key(&key) {
                return Err(ConfigError::Knowledgebase(format!("duplicate variety '{}'", entry.name)));
            }

            let mut profiles = BTreeMap::new();
            for profile in entry.profiles {
                let resolved = resolve_profile(&entry.name, &profile)?;
                if profiles.insert(profile.pathogen, resolved).is_some() {
                    return Err(ConfigError::Knowledgebase(format!(
                        "duplicate profile {} / {}",
                        entry.name, profile.pathogen
                    )));
                }
            }

            let default = entry.default_rating.map(|rating| {
                let note = entry.default_note.clone().unwrap_or_else(|| {
                    format!("Variety-level {} rating; no pathogen-specific screening on record", rating)
                });
                (rating, note)
            });

            varieties.insert(
                key,
                Variety {
                    name: entry.name.trim().to_string(),
                    default,
                    profiles,
                },
            );
        }

        log::debug!("Knowledgebase built with {} varieties", varieties.len());

        Ok(Self {
            version: file.version,
            varieties,
        })
    }

    /// Load a JSON knowledgebase file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: KnowledgebaseFile = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loading knowledgebase from {}", path.display());
        Self::from_entries(file)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.varieties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varieties.is_empty()
    }
}

fn resolve_profile(variety: &str, entry: &ProfileEntry) -> Result<Profile, ConfigError> {
    if !entry.pathogen.is_known() {
        return Err(ConfigError::Knowledgebase(format!(
            "{}: profiles cannot target the unknown pathogen",
            variety
        )));
    }

    if let Some(score) = entry.score {
        if !(0.0..=10.0).contains(&score) {
            return Err(ConfigError::Knowledgebase(format!(
                "{} / {}: score {} outside 0-10",
                variety, entry.pathogen, score
            )));
        }
    }

    let rating = match (entry.rating, entry.score) {
        (Some(rating), _) => rating,
        (None, Some(score)) => ResistanceRating::from_score(score),
        (None, None) => {
            return Err(ConfigError::Knowledgebase(format!(
                "{} / {}: profile needs a rating or a score",
                variety, entry.pathogen
            )))
        }
    };

    let note = entry.note.clone().unwrap_or_else(|| match entry.score {
        Some(score) => format!("Resistance score {:.1}/10", score),
        None => format!("Rated {}", rating),
    });

    Ok(Profile {
        rating,
        score: entry.score,
        note,
    })
}

impl Knowledgebase for InMemoryKnowledgebase {
    fn lookup(&self, variety: &str, pathogen: Pathogen) -> ResistanceRecord {
        let key = variety_key(variety);
        if key.is_empty() {
            return ResistanceRecord::unknown(variety, pathogen, "No variety given; resistance cannot be resolved");
        }

        // The unknown key always maps to an unknown rating
        if !pathogen.is_known() {
            return ResistanceRecord::unknown(
                variety,
                pathogen,
                "Pathogen not identified; resistance cannot be resolved",
            );
        }

        let Some(entry) = self.varieties.get(&key) else {
            log::debug!("Variety '{}' not in knowledgebase", variety);
            return ResistanceRecord::unknown(
                variety,
                pathogen,
                format!("Variety '{}' is not in the resistance knowledgebase", variety.trim()),
            );
        };

        if let Some(profile) = entry.profiles.get(&pathogen) {
            return ResistanceRecord {
                variety: entry.name.clone(),
                pathogen,
                rating: profile.rating,
                score: profile.score,
                source: RecordSource::Exact,
                note: profile.note.clone(),
            };
        }

        if let Some((rating, note)) = &entry.default {
            return ResistanceRecord {
                variety: entry.name.clone(),
                pathogen,
                rating: *rating,
                score: None,
                source: RecordSource::VarietyDefault,
                note: note.clone(),
            };
        }

        ResistanceRecord::unknown(
            &entry.name,
            pathogen,
            format!("No {} screening on record for {}", pathogen, entry.name),
        )
    }

    fn varieties(&self) -> Vec<String> {
        self.varieties.values().map(|v| v.name.clone()).collect()
    }

    fn profiles(&self) -> Vec<ResistanceRecord> {
        self.varieties
            .values()
            .flat_map(|v| {
                v.profiles.iter().map(move |(pathogen, p)| ResistanceRecord {
                    variety: v.name.clone(),
                    pathogen: *pathogen,
                    rating: p.rating,
                    score: p.score,
                    source: RecordSource::Exact,
                    note: p.note.clone(),
                })
            })
            .collect()
    }
}
