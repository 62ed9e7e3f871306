//! Features Module - Classifier input extraction
//!
//! Turns a SampleInput into the fixed, versioned vector the pathogen models
//! consume. The layout is owned here; models only validate against it.

pub mod layout;
pub mod vector;

pub use layout::{layout_hash, LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_VERSION};
pub use vector::FeatureVector;

use crate::logic::sample::SampleInput;

/// Classifier input for one sample
pub fn extract(sample: &SampleInput) -> FeatureVector {
    FeatureVector::from_sample(sample)
}
