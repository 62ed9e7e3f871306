//! Pipeline Module - End-to-end Diagnosis
//!
//! SampleInput → validation → features → classifier → knowledgebase lookup
//! → risk assessment → fusion. Every component is built once from an
//! `EngineConfig` and shared read-only across requests.
//!
//! ## Usage
//! ```ignore
//! let config = config::load(None)?;
//! let pipeline = DiagnosisPipeline::from_config(&config)?;
//! let outcome = pipeline.diagnose(&sample)?;
//! ```

pub mod diagnose;


pub use diagnose::{DiagnosisOutcome, DiagnosisPipeline};
