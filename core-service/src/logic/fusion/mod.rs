//! Fusion Module - Decision Fusion Engine
//!
//! Combines the classifier prediction, the variety's resistance and the
//! environmental risk into a single `DiagnosisDecision`.
//!
//! ## Structure
//! - `types`: RecommendationLevel, ConflictKind, DiagnosisDecision
//! - `table`: priority table and its validation
//! - `config`: thresholds
//! - `engine`: `FusionEngine::decide`
//!
//! ## Usage
//! ```ignore
//! let engine = FusionEngine::new(FusionConfig::default(), "2024.1")?;
//! let decision = engine.decide(&prediction, &resistance, &risk);
//! ```

pub mod config;
pub mod engine;
pub mod table;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::FusionConfig;
pub use engine::FusionEngine;
pub use table::{PriorityCell, PriorityMatrix, PriorityTable};
pub use types::{ConfidenceRating, ConflictKind, DiagnosisDecision, RecommendationLevel, LAB_ANALYSIS_ACTION};
