//! Pathogen Labels
//!
//! The fixed pathogen enumeration and the mapping from whatever a model
//! emits ("Magnaporthe oryzae", "Rice Blast", "BLB", ...) onto it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// PATHOGEN
// ============================================================================

/// Known rice pathogens, plus `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathogen {
    /// Magnaporthe oryzae
    Blast,
    /// Rhizoctonia solani
    SheathBlight,
    /// Xanthomonas oryzae pv. oryzae
    BacterialBlight,
    Unknown,
}

impl Pathogen {
    /// Identified pathogens (excludes `Unknown`)
    pub const KNOWN: [Pathogen; 3] = [
        Pathogen::Blast,
        Pathogen::SheathBlight,
        Pathogen::BacterialBlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pathogen::Blast => "blast",
            Pathogen::SheathBlight => "sheath_blight",
            Pathogen::BacterialBlight => "bacterial_blight",
            Pathogen::Unknown => "unknown",
        }
    }

    pub fn scientific_name(&self) -> &'static str {
        match self {
            Pathogen::Blast => "Magnaporthe oryzae",
            Pathogen::SheathBlight => "Rhizoctonia solani",
            Pathogen::BacterialBlight => "Xanthomonas oryzae",
            Pathogen::Unknown => "Unknown pathogen",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Pathogen::Unknown)
    }

    /// Map a raw label onto the enumeration. `None` = unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        LABEL_ALIASES.get(key.as_str()).copied()
    }
}

impl std::fmt::Display for Pathogen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

static LABEL_ALIASES: Lazy<HashMap<&'static str, Pathogen>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let aliases: &[(&str, Pathogen)] = &[
        ("blast", Pathogen::Blast),
        ("rice_blast", Pathogen::Blast),
        ("leaf_blast", Pathogen::Blast),
        ("neck_blast", Pathogen::Blast),
        ("magnaporthe_oryzae", Pathogen::Blast),
        ("pyricularia_oryzae", Pathogen::Blast),
        ("sheath_blight", Pathogen::SheathBlight),
        ("rice_sheath_blight", Pathogen::SheathBlight),
        ("rhizoctonia_solani", Pathogen::SheathBlight),
        ("bacterial_blight", Pathogen::BacterialBlight),
        ("bacterial_leaf_blight", Pathogen::BacterialBlight),
        ("blb", Pathogen::BacterialBlight),
        ("xanthomonas_oryzae", Pathogen::BacterialBlight),
        ("xanthomonas_oryzae_pv_oryzae", Pathogen::BacterialBlight),
        ("unknown", Pathogen::Unknown),
        ("unknown_pathogen", Pathogen::Unknown),
    ];
    for (alias, pathogen) in aliases {
        map.insert(*alias, *pathogen);
    }
    map
});

/// Lowercase, collapse every non-alphanumeric run into `_`, trim `_`
pub fn normalize_label(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    NON_WORD
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================
