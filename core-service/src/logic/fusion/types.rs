//! Fusion Types
//!
//! The decision record and its enumerations. Decisions are immutable values;
//! serialization order is fixed by field order so identical inputs produce
//! identical bytes.

use serde::{Deserialize, Serialize};

use crate::logic::environment::{EnvironmentalRisk, RiskLevel};
use crate::logic::knowledgebase::ResistanceRating;
use crate::logic::model::Pathogen;

// ============================================================================
// RECOMMENDATION LEVEL
// ============================================================================

/// Overall urgency of the recommendation, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    Low,
    Moderate,
    High,
    Urgent,
}

impl RecommendationLevel {
    pub const ALL: [RecommendationLevel; 4] = [
        RecommendationLevel::Low,
        RecommendationLevel::Moderate,
        RecommendationLevel::High,
        RecommendationLevel::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationLevel::Low => "low",
            RecommendationLevel::Moderate => "moderate",
            RecommendationLevel::High => "high",
            RecommendationLevel::Urgent => "urgent",
        }
    }

    /// Primary field action for this level
    pub fn action(&self) -> &'static str {
        match self {
            RecommendationLevel::Low => "Monitor & Observe",
            RecommendationLevel::Moderate => "Preventive Action",
            RecommendationLevel::High => "Urgent Monitoring",
            RecommendationLevel::Urgent => "Immediate Treatment",
        }
    }
}

impl std::fmt::Display for RecommendationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action when the pathogen could not be identified
pub const LAB_ANALYSIS_ACTION: &str = "Laboratory Analysis Needed";

// ============================================================================
// CONFIDENCE RATING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceRating {
    Low,
    Medium,
    High,
}

impl ConfidenceRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceRating::Low => "low",
            ConfidenceRating::Medium => "medium",
            ConfidenceRating::High => "high",
        }
    }

    /// One band lower; `Low` stays `Low`
    pub fn demoted(self) -> Self {
        match self {
            ConfidenceRating::High => ConfidenceRating::Medium,
            ConfidenceRating::Medium | ConfidenceRating::Low => ConfidenceRating::Low,
        }
    }
}

impl std::fmt::Display for ConfidenceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONFLICTS
// ============================================================================

/// Disagreement between the three input signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Low classifier confidence behind a high-urgency recommendation
    LowConfidenceUrgent,
    /// Classifier could not name a pathogen
    UnidentifiedPathogen,
    /// Confident prediction but no resistance data for the variety
    MissingResistanceData,
    /// Variety resistance and field conditions point opposite ways
    ResistanceRiskDivergence,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::LowConfidenceUrgent => "low_confidence_urgent",
            ConflictKind::UnidentifiedPathogen => "unidentified_pathogen",
            ConflictKind::MissingResistanceData => "missing_resistance_data",
            ConflictKind::ResistanceRiskDivergence => "resistance_risk_divergence",
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DIAGNOSIS DECISION
// ============================================================================

/// Final fused decision for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisDecision {
    pub pathogen: Pathogen,
    pub resistance: ResistanceRating,
    pub risk: RiskLevel,
    pub risk_score: f32,
    pub level: RecommendationLevel,
    pub action: String,
    pub confidence: f32,
    pub confidence_rating: ConfidenceRating,
    pub conflict: bool,
    pub conflicts: Vec<ConflictKind>,
    pub conflict_explanation: Option<String>,
    pub guidance: Vec<String>,
    pub config_version: String,
}

impl DiagnosisDecision {
    pub fn has_conflict(&self, kind: ConflictKind) -> bool {
        self.conflicts.contains(&kind)
    }
}

/// Snapshot of risk needed by the engine, kept for logging
pub(crate) fn risk_summary(risk: &EnvironmentalRisk) -> String {
    format!("{} ({:.0}/{:.0})", risk.level, risk.score, risk.max_score)
}
