//! Knowledgebase Types
//!
//! Resistance ratings and records. No logic beyond ordering helpers.

use serde::{Deserialize, Serialize};

use crate::logic::model::Pathogen;

// ============================================================================
// RESISTANCE RATING
// ============================================================================

/// How well a variety withstands a pathogen.
///
/// The first four values are ordered from least to most susceptible.
/// `Unknown` sits outside that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceRating {
    Resistant,
    ModeratelyResistant,
    Susceptible,
    HighlySusceptible,
    Unknown,
}

impl ResistanceRating {
    pub const ALL: [ResistanceRating; 5] = [
        ResistanceRating::Resistant,
        ResistanceRating::ModeratelyResistant,
        ResistanceRating::Susceptible,
        ResistanceRating::HighlySusceptible,
        ResistanceRating::Unknown,
    ];

    /// Known ratings, least susceptible first
    pub const ORDERED: [ResistanceRating; 4] = [
        ResistanceRating::Resistant,
        ResistanceRating::ModeratelyResistant,
        ResistanceRating::Susceptible,
        ResistanceRating::HighlySusceptible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResistanceRating::Resistant => "resistant",
            ResistanceRating::ModeratelyResistant => "moderately_resistant",
            ResistanceRating::Susceptible => "susceptible",
            ResistanceRating::HighlySusceptible => "highly_susceptible",
            ResistanceRating::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.iter().copied().find(|r| r.as_str() == key)
    }

    /// 0 (resistant) .. 3 (highly susceptible); `None` for Unknown
    pub fn susceptibility_rank(&self) -> Option<u8> {
        match self {
            ResistanceRating::Resistant => Some(0),
            ResistanceRating::ModeratelyResistant => Some(1),
            ResistanceRating::Susceptible => Some(2),
            ResistanceRating::HighlySusceptible => Some(3),
            ResistanceRating::Unknown => None,
        }
    }

    /// Rating for a 0-10 resistance score (higher = more resistant)
    pub fn from_score(score: f32) -> Self {
        if score.is_nan() {
            ResistanceRating::Unknown
        } else if score >= 7.5 {
            ResistanceRating::Resistant
        } else if score >= 6.0 {
            ResistanceRating::ModeratelyResistant
        } else if score >= 4.0 {
            ResistanceRating::Susceptible
        } else {
            ResistanceRating::HighlySusceptible
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResistanceRating::Unknown)
    }

    pub fn is_susceptible(&self) -> bool {
        matches!(self, ResistanceRating::Susceptible | ResistanceRating::HighlySusceptible)
    }
}

impl std::fmt::Display for ResistanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESISTANCE RECORD
// ============================================================================

/// Where a lookup result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Exact (variety, pathogen) profile
    Exact,
    /// Variety-level default rating
    VarietyDefault,
    /// Nothing matched; rating is Unknown
    Fallback,
}

/// Resolved resistance for one (variety, pathogen) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceRecord {
    pub variety: String,
    pub pathogen: Pathogen,
    pub rating: ResistanceRating,
    /// 0-10 screening score, when one was recorded
    #[serde(default)]
    pub score: Option<f32>,
    pub source: RecordSource,
    /// Advisory text or the reason for a fallback
    pub note: String,
}

impl ResistanceRecord {
    /// Unknown rating with an explanatory note
    pub fn unknown(variety: &str, pathogen: Pathogen, note: impl Into<String>) -> Self {
        Self {
            variety: variety.to_string(),
            pathogen,
            rating: ResistanceRating::Unknown,
            score: None,
            source: RecordSource::Fallback,
            note: note.into(),
        }
    }

    /// Record for tests and fixtures
    pub fn exact(variety: &str, pathogen: Pathogen, rating: ResistanceRating) -> Self {
        Self {
            variety: variety.to_string(),
            pathogen,
            rating,
            score: None,
            source: RecordSource::Exact,
            note: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_score_bands() {
        assert_eq!(ResistanceRating::from_score(8.1), ResistanceRating::Resistant);
        assert_eq!(ResistanceRating::from_score(7.5), ResistanceRating::Resistant);
        assert_eq!(ResistanceRating::from_score(7.2), ResistanceRating::ModeratelyResistant);
        assert_eq!(ResistanceRating::from_score(5.5), ResistanceRating::Susceptible);
        assert_eq!(ResistanceRating::from_score(3.9), ResistanceRating::HighlySusceptible);
        assert_eq!(ResistanceRating::from_score(f32::NAN), ResistanceRating::Unknown);
    }

    #[test]
    fn test_rank_order_matches_ordered() {
        for (i, rating) in ResistanceRating::ORDERED.iter().enumerate() {
            assert_eq!(rating.susceptibility_rank(), Some(i as u8));
        }
        assert_eq!(ResistanceRating::Unknown.susceptibility_rank(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(ResistanceRating::parse("Moderately Resistant"), Some(ResistanceRating::ModeratelyResistant));
        assert_eq!(ResistanceRating::parse("highly-susceptible"), Some(ResistanceRating::HighlySusceptible));
        assert_eq!(ResistanceRating::parse("immune"), None);
    }
}
