//! Model Module - Pathogen Classifier Adapter
//!
//! Keeps the external classifier's nondeterminism out of the engine.
//! Models are swappable behind `PathogenModel`; the adapter normalizes output.

pub mod adapter;
pub mod fallback;
pub mod inference;
pub mod labels;
pub mod types;

pub use adapter::ClassifierAdapter;
pub use fallback::RuleBasedModel;
pub use inference::{ModelError, ModelManifest, OnnxPathogenModel, PathogenModel};
pub use labels::Pathogen;
pub use types::{PathogenPrediction, RawPrediction};
