//! Engine Errors
//!
//! Only two kinds of failure ever reach a caller: a bad request and a bad
//! configuration. Everything else degrades into the decision record.

use std::path::PathBuf;

use thiserror::Error;

use crate::logic::sample::InputValidationError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Malformed or incomplete configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("risk bands: {0}")]
    RiskBands(String),

    #[error("{factor} rules: {reason}")]
    FactorRules { factor: String, reason: String },

    #[error("priority table: {0}")]
    PriorityTable(String),

    #[error("threshold `{name}` = {value} is outside {range}")]
    Threshold {
        name: &'static str,
        value: f32,
        range: &'static str,
    },

    #[error("{field}: {reason}")]
    Field { field: &'static str, reason: String },

    #[error("classifier model: {0}")]
    Model(String),

    #[error("knowledgebase: {0}")]
    Knowledgebase(String),

    #[error("environment variable {name}: {reason}")]
    Env { name: String, reason: String },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised to the caller of the diagnosis pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid sample: {0}")]
    InputValidation(#[from] InputValidationError),

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl EngineError {
    pub fn is_input_error(&self) -> bool {
        matches!(self, EngineError::InputValidation(_))
    }
}
