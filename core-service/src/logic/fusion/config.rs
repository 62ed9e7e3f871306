//! Fusion Configuration
//!
//! Thresholds used by conflict detection and confidence scoring, plus the
//! priority table. Validated once when the engine is built.

use serde::{Deserialize, Serialize};

use super::table::PriorityTable;
use super::types::{ConfidenceRating, RecommendationLevel};
use crate::logic::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Below this, an urgent-level baseline is flagged
    pub low_confidence_threshold: f32,
    /// At or above this, missing resistance data is flagged
    pub high_confidence_threshold: f32,
    /// Lowest baseline level that counts as urgent for conflict purposes
    pub urgent_level: RecommendationLevel,
    /// Confidence ceiling when resistance is unknown or risk indeterminate
    pub missing_data_confidence_cap: f32,
    /// Confidence multiplier when any conflict is present
    pub conflict_confidence_factor: f32,
    /// Flag susceptible/low-risk and resistant/severe-risk combinations
    pub flag_signal_divergence: bool,
    /// Confidence rating bands
    pub high_confidence_rating: f32,
    pub medium_confidence_rating: f32,
    pub priority_table: PriorityTable,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.5,
            high_confidence_threshold: 0.7,
            urgent_level: RecommendationLevel::High,
            missing_data_confidence_cap: 0.4,
            conflict_confidence_factor: 0.75,
            flag_signal_divergence: true,
            high_confidence_rating: 0.75,
            medium_confidence_rating: 0.5,
            priority_table: PriorityTable::default(),
        }
    }
}

impl FusionConfig {
    /// Preset without divergence flagging and a milder conflict penalty
    pub fn lenient() -> Self {
        Self {
            flag_signal_divergence: false,
            conflict_confidence_factor: 0.9,
            ..Self::default()
        }
    }

    pub fn confidence_rating(&self, confidence: f32) -> ConfidenceRating {
        if confidence >= self.high_confidence_rating {
            ConfidenceRating::High
        } else if confidence >= self.medium_confidence_rating {
            ConfidenceRating::Medium
        } else {
            ConfidenceRating::Low
        }
    }

    /// Validates thresholds only; the table is validated by the engine
    pub fn validate_thresholds(&self) -> Result<(), ConfigError> {
        let unit = [
            ("low_confidence_threshold", self.low_confidence_threshold),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("missing_data_confidence_cap", self.missing_data_confidence_cap),
            ("conflict_confidence_factor", self.conflict_confidence_factor),
            ("high_confidence_rating", self.high_confidence_rating),
            ("medium_confidence_rating", self.medium_confidence_rating),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Threshold {
                    name,
                    value,
                    range: "0..=1",
                });
            }
        }

        if self.conflict_confidence_factor >= 1.0 {
            return Err(ConfigError::Threshold {
                name: "conflict_confidence_factor",
                value: self.conflict_confidence_factor,
                range: "0..1",
            });
        }
        if self.low_confidence_threshold > self.high_confidence_threshold {
            return Err(ConfigError::Threshold {
                name: "low_confidence_threshold",
                value: self.low_confidence_threshold,
                range: "<= high_confidence_threshold",
            });
        }
        if self.medium_confidence_rating > self.high_confidence_rating {
            return Err(ConfigError::Threshold {
                name: "medium_confidence_rating",
                value: self.medium_confidence_rating,
                range: "<= high_confidence_rating",
            });
        }
        Ok(())
    }
}
