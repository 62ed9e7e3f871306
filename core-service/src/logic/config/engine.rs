//! Engine Configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{default_history_dir, CONFIG_VERSION, HISTORY_MAX_FILE_BYTES};
use crate::logic::environment::RiskModelConfig;
use crate::logic::error::ConfigError;
use crate::logic::fusion::FusionConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// ONNX model; the rule-based model is used when unset
    pub model_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub dir: PathBuf,
    pub max_file_bytes: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: default_history_dir(),
            max_file_bytes: HISTORY_MAX_FILE_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub version: String,
    pub risk: RiskModelConfig,
    pub fusion: FusionConfig,
    pub classifier: ClassifierConfig,
    /// JSON knowledgebase replacing the built-in data
    pub knowledgebase_path: Option<PathBuf>,
    pub history: HistoryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            risk: RiskModelConfig::default(),
            fusion: FusionConfig::default(),
            classifier: ClassifierConfig::default(),
            knowledgebase_path: None,
            history: HistoryConfig::default(),
        }
    }
}

/// Decision-relevant part of the config, hashed for the fingerprint
#[derive(Serialize)]
struct Fingerprinted<'a> {
    version: &'a str,
    risk: &'a RiskModelConfig,
    fusion: &'a FusionConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::Field {
                field: "version",
                reason: "must not be empty".to_string(),
            });
        }
        self.risk.validate()?;
        self.fusion.validate_thresholds()?;
        self.fusion.priority_table.validate()?;
        if self.history.max_file_bytes == 0 {
            return Err(ConfigError::Field {
                field: "history.max_file_bytes",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// SHA-256 over version, risk rules and fusion tables (hex). Paths are
    /// not part of it.
    pub fn fingerprint(&self) -> String {
        let view = Fingerprinted {
            version: &self.version,
            risk: &self.risk,
            fusion: &self.fusion,
        };
        // Plain structs of numbers, strings and enums always serialize
        let bytes = serde_json::to_vec(&view).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }

    /// First 12 hex chars, for display
    pub fn short_fingerprint(&self) -> String {
        self.fingerprint()[..12].to_string()
    }
}
