//! Sample Module
//!
//! Inbound diagnosis requests from the UI/CLI collaborator.
//!
//! ## Structure
//! - `types`: SampleInput, EnvironmentalReadings, Season, GrowthStage
//! - `validate`: InputValidationError and the pre-pipeline check

pub mod types;
pub mod validate;

pub use types::{EnvironmentalReadings, GrowthStage, SampleInput, Season};
pub use validate::{validate_sample, InputValidationError};
