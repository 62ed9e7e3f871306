//! PathoTracer Core - rice disease decision engine
//!
//! Fuses a pathogen classifier's prediction with varietal resistance data and
//! an environmental risk model into one actionable, reproducible decision.

pub mod constants;
pub mod logic;

pub use logic::error::{ConfigError, EngineError, EngineResult};
pub use logic::fusion::DiagnosisDecision;
pub use logic::pipeline::{DiagnosisOutcome, DiagnosisPipeline};
pub use logic::sample::SampleInput;
