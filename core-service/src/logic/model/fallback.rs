//! Rule-Based Pathogen Model
//!
//! Heuristic classifier used when no trained model is available.
//! Symptom keywords weigh 0.4, each favourable condition 0.2; a pathogen is a
//! candidate once its score passes 0.5 and confidence is capped at 0.95.

use super::inference::{ModelError, PathogenModel};
use super::labels::Pathogen;
use super::types::RawPrediction;
use crate::logic::features::FeatureVector;
use crate::logic::sample::GrowthStage;

const SYMPTOM_WEIGHT: f32 = 0.4;
const CONDITION_WEIGHT: f32 = 0.2;
const CANDIDATE_MIN: f32 = 0.5;
const CONFIDENCE_CAP: f32 = 0.95;

/// Confidence when symptoms exist but no pathogen profile matched
const SYMPTOMS_ONLY_CONFIDENCE: f32 = 0.6;
/// Confidence reported with the `unknown` label
const NO_SIGNAL_CONFIDENCE: f32 = 0.3;

// ============================================================================
// PATHOGEN PROFILES
// ============================================================================

struct Profile {
    pathogen: Pathogen,
    symptoms: &'static [&'static str],
    temperature: (f32, f32),
    humidity_min: f32,
    stages: &'static [GrowthStage],
    rainfall_min: Option<f32>,
}

const PROFILES: &[Profile] = &[
    Profile {
        pathogen: Pathogen::Blast,
        symptoms: &["symptom_leaf_spots", "symptom_neck_rot", "symptom_panicle_blast"],
        temperature: (20.0, 30.0),
        humidity_min: 85.0,
        stages: &[GrowthStage::Heading, GrowthStage::Flowering],
        rainfall_min: None,
    },
    Profile {
        pathogen: Pathogen::SheathBlight,
        symptoms: &["symptom_sheath_lesions", "symptom_yellowing"],
        temperature: (25.0, 32.0),
        humidity_min: 80.0,
        stages: &[GrowthStage::Tillering, GrowthStage::StemElongation],
        rainfall_min: None,
    },
    Profile {
        pathogen: Pathogen::BacterialBlight,
        symptoms: &["symptom_leaf_blight", "symptom_yellowing", "symptom_wilting"],
        temperature: (25.0, 34.0),
        humidity_min: 70.0,
        stages: &[],
        rainfall_min: Some(10.0),
    },
];

impl Profile {
    fn score(&self, features: &FeatureVector) -> f32 {
        let mut score = 0.0f32;

        if self.symptoms.iter().any(|s| features.flag(s)) {
            score += SYMPTOM_WEIGHT;
        }

        if let Some(t) = features.reading("temperature_c", "temperature_present") {
            if t >= self.temperature.0 && t <= self.temperature.1 {
                score += CONDITION_WEIGHT;
            }
        }

        if let Some(h) = features.reading("humidity_pct", "humidity_present") {
            if h >= self.humidity_min {
                score += CONDITION_WEIGHT;
            }
        }

        let stage = features
            .get_by_name("growth_stage")
            .and_then(|v| GrowthStage::from_ordinal(v.round() as u8));
        if matches!(stage, Some(s) if self.stages.contains(&s)) {
            score += CONDITION_WEIGHT;
        }

        if let (Some(min), Some(rain)) = (
            self.rainfall_min,
            features.reading("rainfall_mm", "rainfall_present"),
        ) {
            if rain > min {
                score += CONDITION_WEIGHT;
            }
        }

        score
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// Deterministic heuristic model
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedModel;

impl RuleBasedModel {
    pub fn new() -> Self {
        Self
    }

    /// All pathogens above the candidate threshold, best first
    pub fn candidates(&self, features: &FeatureVector) -> Vec<(Pathogen, f32)> {
        let mut candidates: Vec<(Pathogen, f32)> = PROFILES
            .iter()
            .map(|p| (p.pathogen, p.score(features)))
            .filter(|(_, score)| *score > CANDIDATE_MIN)
            .map(|(pathogen, score)| (pathogen, score.min(CONFIDENCE_CAP)))
            .collect();

        // Stable sort keeps profile order on ties
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }
}

impl PathogenModel for RuleBasedModel {
    fn name(&self) -> &str {
        "rules"
    }

    fn predict(&self, features: &FeatureVector) -> Result<RawPrediction, ModelError> {
        features.validate()?;

        let (label, confidence) = match self.candidates(features).first() {
            Some((pathogen, score)) => (pathogen.scientific_name(), *score),
            // Blast is the most common field diagnosis
            None if features.has_any_symptom() => {
                (Pathogen::Blast.scientific_name(), SYMPTOMS_ONLY_CONFIDENCE)
            }
            None => ("Unknown", NO_SIGNAL_CONFIDENCE),
        };

        Ok(RawPrediction {
            label: label.to_string(),
            confidence,
            method: self.name().to_string(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
