//! Inference Engine - ONNX Runtime Integration
//!
//! Loads and runs the external pathogen classifier.
//! Kept separate from the adapter so the model can be swapped freely.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::RawPrediction;
use crate::logic::features::{FeatureVector, LayoutInfo, LayoutMismatchError, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Model failure. Never leaves the adapter.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model not found: {0}")]
    NotFound(PathBuf),

    #[error("model manifest error: {0}")]
    Manifest(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("onnx runtime error: {0}")]
    Runtime(String),

    #[error("unexpected model output: {0}")]
    Output(String),
}

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Anything that can turn a feature vector into a pathogen label
pub trait PathogenModel: Send + Sync {
    /// Method tag recorded on predictions (onnx, rules, ...)
    fn name(&self) -> &str;
    fn predict(&self, features: &FeatureVector) -> Result<RawPrediction, ModelError>;
}

// ============================================================================
// MODEL MANIFEST
// ============================================================================

/// Sidecar describing the classifier's output classes and input layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Output class labels, in output-tensor order
    pub labels: Vec<String>,
    /// Feature layout the model was trained on
    #[serde(default)]
    pub layout: Option<LayoutInfo>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl ModelManifest {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            layout: None,
            model_version: None,
        }
    }

    /// Read `<model>.json` next to the model file
    pub fn load_sidecar(model_path: &Path) -> Result<Self, ModelError> {
        let path = model_path.with_extension("json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ModelError::Manifest(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ModelError::Manifest(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.labels.is_empty() {
            return Err(ModelError::Manifest("no output labels".to_string()));
        }
        if let Some(layout) = &self.layout {
            layout.check()?;
        }
        Ok(())
    }
}

// ============================================================================
// MODEL METADATA
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_version: Option<String>,
    pub labels: Vec<String>,
    pub features: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX classifier. The session needs exclusive access per run.
pub struct OnnxPathogenModel {
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxPathogenModel {
    /// Load model from file, reading the manifest sidecar
    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        let manifest = ModelManifest::load_sidecar(model_path)?;
        Self::load_with_manifest(model_path, manifest)
    }

    pub fn load_with_manifest(model_path: &Path, manifest: ModelManifest) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ModelError::NotFound(model_path.to_path_buf()));
        }
        manifest.validate()?;

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Runtime(format!("Failed to load model: {}", e)))?;

        log::info!("ONNX model loaded ({} labels)", manifest.labels.len());

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: model_path.display().to_string(),
                model_version: manifest.model_version,
                labels: manifest.labels,
                features: FEATURE_COUNT,
                loaded_at: chrono::Utc::now(),
            },
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn run(&self, features: &FeatureVector) -> Result<Vec<f32>, ModelError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.as_slice().to_vec())
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Output("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| ModelError::Output("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Output(format!("Extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }
}

impl PathogenModel for OnnxPathogenModel {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict(&self, features: &FeatureVector) -> Result<RawPrediction, ModelError> {
        features.validate()?;

        let start_time = std::time::Instant::now();
        let scores = self.run(features)?;
        let labels = &self.metadata.labels;

        if scores.len() < labels.len() {
            return Err(ModelError::Output(format!(
                "{} scores for {} labels",
                scores.len(),
                labels.len()
            )));
        }

        let (best, confidence) = argmax(&scores[..labels.len()])
            .ok_or_else(|| ModelError::Output("empty output".to_string()))?;

        log::debug!(
            "ONNX inference: {} ({:.3}) in {}us",
            labels[best],
            confidence,
            start_time.elapsed().as_micros()
        );

        Ok(RawPrediction {
            label: labels[best].clone(),
            confidence,
            method: self.name().to_string(),
        })
    }
}

/// Index and value of the largest finite score
fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, s)| s.is_finite())
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
        assert_eq!(argmax(&[f32::NAN, 0.3]), Some((1, 0.3)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_manifest_requires_labels() {
        assert!(ModelManifest::new(vec![]).validate().is_err());
        assert!(ModelManifest::new(vec!["blast".to_string()]).validate().is_ok());
    }

    #[test]
    fn test_manifest_rejects_foreign_layout() {
        let mut manifest = ModelManifest::new(vec!["blast".to_string()]);
        let mut layout = LayoutInfo::current();
        layout.version += 1;
        manifest.layout = Some(layout);

        assert!(matches!(manifest.validate(), Err(ModelError::Layout(_))));
    }

    #[test]
    fn test_load_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.onnx");
        let result = OnnxPathogenModel::load_with_manifest(&path, ModelManifest::new(vec!["blast".to_string()]));
        assert!(matches!(result, Err(ModelError::NotFound(_))));
    }

    #[test]
    fn test_sidecar_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("classifier.onnx");
        std::fs::write(
            dir.path().join("classifier.json"),
            r#"{"labels": ["Magnaporthe oryzae", "Rhizoctonia solani"], "model_version": "3"}"#,
        )
        .unwrap();

        let manifest = ModelManifest::load_sidecar(&model_path).unwrap();
        assert_eq!(manifest.labels.len(), 2);
        assert_eq!(manifest.model_version.as_deref(), Some("3"));
    }
}
