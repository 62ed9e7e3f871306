//! Model Types
//!
//! Raw model output and the normalized prediction handed to the rest of
//! the engine. No logic here - only data structures.

use serde::{Deserialize, Serialize};

use super::labels::Pathogen;

// ============================================================================
// RAW PREDICTION (model side)
// ============================================================================

/// Whatever the model said, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Model's own label string
    pub label: String,
    /// Unchecked confidence, may be outside [0,1] or NaN
    pub confidence: f32,
    /// Method used (onnx, rules)
    pub method: String,
}

// ============================================================================
// PATHOGEN PREDICTION (engine side)
// ============================================================================

/// Normalized classifier output. Produced once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathogenPrediction {
    pub pathogen: Pathogen,
    /// Always within [0,1]; 0 for `Unknown`
    pub confidence: f32,
    /// onnx, rules, degraded, fixture
    pub method: String,
    /// Original model label, kept for audit only
    #[serde(default)]
    pub raw_label: Option<String>,
    /// Why the prediction was degraded, if it was
    #[serde(default)]
    pub degraded: Option<String>,
}

impl PathogenPrediction {
    /// Prediction for tests and replay; confidence is clamped like the adapter does
    pub fn new(pathogen: Pathogen, confidence: f32) -> Self {
        let confidence = if pathogen.is_known() && confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            pathogen,
            confidence,
            method: "fixture".to_string(),
            raw_label: None,
            degraded: None,
        }
    }

    /// `Unknown` with zero confidence and the reason recorded
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            pathogen: Pathogen::Unknown,
            confidence: 0.0,
            method: "degraded".to_string(),
            raw_label: None,
            degraded: Some(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

impl Default for PathogenPrediction {
    fn default() -> Self {
        Self::unknown("no prediction")
    }
}
