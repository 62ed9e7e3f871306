//! Fusion Engine - merges prediction, resistance and risk into one decision
//!
//! `decide` is a pure function of its three inputs and the immutable
//! configuration. It never fails: missing or contradictory signals lower the
//! confidence and raise a conflict instead.

use super::config::FusionConfig;
use super::table::PriorityMatrix;
use super::types::{risk_summary, ConflictKind, DiagnosisDecision, RecommendationLevel, LAB_ANALYSIS_ACTION};
use crate::logic::advisory::{self, GuidanceContext};
use crate::logic::environment::{EnvironmentalRisk, RiskFactor, RiskLevel};
use crate::logic::error::ConfigError;
use crate::logic::knowledgebase::{ResistanceRating, ResistanceRecord};
use crate::logic::model::PathogenPrediction;

pub struct FusionEngine {
    config: FusionConfig,
    matrix: PriorityMatrix,
    version: String,
}

impl FusionEngine {
    /// Validate the configuration and build the engine
    pub fn new(config: FusionConfig, version: impl Into<String>) -> Result<Self, ConfigError> {
        config.validate_thresholds()?;
        let matrix = config.priority_table.validate()?;
        Ok(Self {
            config,
            matrix,
            version: version.into(),
        })
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn matrix(&self) -> &PriorityMatrix {
        &self.matrix
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Baseline level for a (rating, risk) pair
    pub fn baseline(&self, rating: ResistanceRating, risk: RiskLevel) -> RecommendationLevel {
        self.matrix.level(rating, risk)
    }

    pub fn decide(
        &self,
        prediction: &PathogenPrediction,
        resistance: &ResistanceRecord,
        risk: &EnvironmentalRisk,
    ) -> DiagnosisDecision {
        let rating = resistance.rating;
        let level = self.baseline(rating, risk.level);
        let classifier_confidence = sanitize(prediction.confidence);

        let conflicts = self.detect_conflicts(prediction, classifier_confidence, rating, risk.level, level);
        let explanation = if conflicts.is_empty() {
            None
        } else {
            Some(
                conflicts
                    .iter()
                    .map(|kind| self.explain(*kind, prediction, resistance, risk, classifier_confidence))
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };

        let mut confidence = classifier_confidence;
        if !rating.is_known() || risk.is_indeterminate() {
            confidence = confidence.min(self.config.missing_data_confidence_cap);
        }
        let mut confidence_rating = self.config.confidence_rating(confidence);
        if !conflicts.is_empty() {
            confidence *= self.config.conflict_confidence_factor;
            // A conflicted decision always rates at least one band lower
            confidence_rating = self
                .config
                .confidence_rating(confidence)
                .min(confidence_rating.demoted());
        }

        let action = if prediction.pathogen.is_known() {
            level.action()
        } else {
            LAB_ANALYSIS_ACTION
        };

        let guidance = advisory::compose(&GuidanceContext {
            pathogen: prediction.pathogen,
            level,
            rating,
            conflict: !conflicts.is_empty(),
            humidity_pct: risk.measured(RiskFactor::Humidity),
        });

        log::debug!(
            "Decision: pathogen={} rating={} risk={} level={} confidence={:.3} conflicts={}",
            prediction.pathogen,
            rating,
            risk_summary(risk),
            level,
            confidence,
            conflicts.len()
        );

        DiagnosisDecision {
            pathogen: prediction.pathogen,
            resistance: rating,
            risk: risk.level,
            risk_score: risk.score,
            level,
            action: action.to_string(),
            confidence,
            confidence_rating,
            conflict: !conflicts.is_empty(),
            conflicts,
            conflict_explanation: explanation,
            guidance,
            config_version: self.version.clone(),
        }
    }

    fn detect_conflicts(
        &self,
        prediction: &PathogenPrediction,
        confidence: f32,
        rating: ResistanceRating,
        risk: RiskLevel,
        level: RecommendationLevel,
    ) -> Vec<ConflictKind> {
        let mut conflicts = Vec::new();

        if confidence < self.config.low_confidence_threshold && level >= self.config.urgent_level {
            conflicts.push(ConflictKind::LowConfidenceUrgent);
        }

        if !prediction.pathogen.is_known() {
            conflicts.push(ConflictKind::UnidentifiedPathogen);
        } else if confidence >= self.config.high_confidence_threshold && !rating.is_known() {
            conflicts.push(ConflictKind::MissingResistanceData);
        }

        if self.config.flag_signal_divergence {
            let diverges = (rating.is_susceptible() && risk == RiskLevel::Low)
                || (rating == ResistanceRating::Resistant && risk == RiskLevel::Severe);
            if diverges {
                conflicts.push(ConflictKind::ResistanceRiskDivergence);
            }
        }

        conflicts
    }

    fn explain(
        &self,
        kind: ConflictKind,
        prediction: &PathogenPrediction,
        resistance: &ResistanceRecord,
        risk: &EnvironmentalRisk,
        confidence: f32,
    ) -> String {
        match kind {
            ConflictKind::LowConfidenceUrgent => format!(
                "classifier confidence {:.2} is below {:.2} for a {} priority recommendation",
                confidence,
                self.config.low_confidence_threshold,
                self.baseline(resistance.rating, risk.level)
            ),
            ConflictKind::UnidentifiedPathogen => match &prediction.degraded {
                Some(reason) => format!("pathogen could not be identified ({})", reason),
                None => "pathogen could not be identified".to_string(),
            },
            ConflictKind::MissingResistanceData => format!(
                "{} predicted with confidence {:.2} but no resistance data for '{}'",
                prediction.pathogen, confidence, resistance.variety
            ),
            ConflictKind::ResistanceRiskDivergence => format!(
                "{} variety under {} environmental risk",
                resistance.rating.as_str().replace('_', " "),
                risk.level
            ),
        }
    }
}

fn sanitize(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
