//! Logic Module - Diagnosis Engine
//!
//! Request flow: `sample` → `features` → `model` → `knowledgebase` +
//! `environment` → `fusion`. `pipeline` wires them together; `history`
//! stores what comes out.
//!
//! ## Structure
//! - `sample/` - Inbound samples and validation
//! - `features/` - Versioned feature layout for classifiers
//! - `model/` - Classifier adapter (ONNX, rule-based)
//! - `knowledgebase/` - Varietal resistance lookup
//! - `environment/` - Environmental risk model
//! - `advisory/` - Pathogen profiles and guidance
//! - `fusion/` - Decision fusion engine
//! - `config/` - Engine configuration
//! - `pipeline/` - End-to-end diagnosis
//! - `history/` - Decision log

pub mod error;

// Inputs
pub mod features;
pub mod sample;

// Signals
pub mod environment;
pub mod knowledgebase;
pub mod model;

// Decision
pub mod advisory;
pub mod fusion;

// Wiring
pub mod config;
pub mod history;
pub mod pipeline;
