//! Classifier Adapter
//!
//! The single point of tolerance for model instability. Whatever the model
//! does (fails, emits a foreign label, returns NaN), the rest of the engine
//! only ever sees a well-formed PathogenPrediction.

use super::inference::PathogenModel;
use super::labels::Pathogen;
use super::types::{PathogenPrediction, RawPrediction};
use crate::logic::features::FeatureVector;

pub struct ClassifierAdapter {
    model: Box<dyn PathogenModel>,
}

impl ClassifierAdapter {
    pub fn new(model: Box<dyn PathogenModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the model and normalize its output. Never fails.
    pub fn predict(&self, features: &FeatureVector) -> PathogenPrediction {
        log::debug!("Classifier '{}' input: {:?}", self.model.name(), features.active());
        match self.model.predict(features) {
            Ok(raw) => normalize(raw),
            Err(e) => {
                log::warn!("Classifier '{}' failed ({}), degrading to unknown", self.model.name(), e);
                PathogenPrediction {
                    method: self.model.name().to_string(),
                    ..PathogenPrediction::unknown(format!("model failure: {}", e))
                }
            }
        }
    }
}

/// Map raw label + confidence into the fixed enumeration
pub fn normalize(raw: RawPrediction) -> PathogenPrediction {
    match Pathogen::from_label(&raw.label) {
        Some(Pathogen::Unknown) => PathogenPrediction {
            pathogen: Pathogen::Unknown,
            confidence: 0.0,
            method: raw.method,
            raw_label: Some(raw.label),
            degraded: Some("model reported no identifiable pathogen".to_string()),
        },
        Some(pathogen) => {
            let confidence = if raw.confidence.is_nan() {
                log::warn!("Classifier returned NaN confidence for '{}'", raw.label);
                0.0
            } else {
                raw.confidence.clamp(0.0, 1.0)
            };
            PathogenPrediction {
                pathogen,
                confidence,
                method: raw.method,
                raw_label: Some(raw.label),
                degraded: None,
            }
        }
        None => {
            log::warn!("Unrecognized classifier label '{}'", raw.label);
            PathogenPrediction {
                pathogen: Pathogen::Unknown,
                confidence: 0.0,
                method: raw.method,
                degraded: Some(format!("unrecognized label '{}'", raw.label)),
                raw_label: Some(raw.label),
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::inference::ModelError;

    struct FixedModel(&'static str, f32);

    impl PathogenModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<RawPrediction, ModelError> {
            Ok(RawPrediction {
                label: self.0.to_string(),
                confidence: self.1,
                method: "fixed".to_string(),
            })
        }
    }

    struct BrokenModel;

    impl PathogenModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<RawPrediction, ModelError> {
            Err(ModelError::Runtime("session poisoned".to_string()))
        }
    }

    fn predict_with(model: impl PathogenModel + 'static) -> PathogenPrediction {
        ClassifierAdapter::new(Box::new(model)).predict(&FeatureVector::new())
    }

    #[test]
    fn test_maps_scientific_label() {
        let p = predict_with(FixedModel("Magnaporthe oryzae", 0.82));
        assert_eq!(p.pathogen, Pathogen::Blast);
        assert!((p.confidence - 0.82).abs() < 1e-6);
        assert_eq!(p.raw_label.as_deref(), Some("Magnaporthe oryzae"));
        assert!(!p.is_degraded());
    }

    #[test]
    fn test_clamps_confidence() {
        assert_eq!(predict_with(FixedModel("blast", 1.4)).confidence, 1.0);
        assert_eq!(predict_with(FixedModel("blast", -3.0)).confidence, 0.0);
        assert_eq!(predict_with(FixedModel("blast", f32::NAN)).confidence, 0.0);
    }

    #[test]
    fn test_unrecognized_label_becomes_unknown() {
        let p = predict_with(FixedModel("tungro", 0.99));
        assert_eq!(p.pathogen, Pathogen::Unknown);
        assert_eq!(p.confidence, 0.0);
        assert!(p.degraded.unwrap().contains("tungro"));
    }

    #[test]
    fn test_unknown_label_has_zero_confidence() {
        let p = predict_with(FixedModel("Unknown", 0.3));
        assert_eq!(p.pathogen, Pathogen::Unknown);
        assert_eq!(p.confidence, 0.0);
    }

    #[test]
    fn test_model_failure_degrades() {
        let p = predict_with(BrokenModel);
        assert_eq!(p.pathogen, Pathogen::Unknown);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.method, "broken");
        assert!(p.degraded.unwrap().contains("session poisoned"));
    }
}
