//! Config Loader
//!
//! JSON objects in the file are merged key by key over the defaults, so a
//! file only needs the values it changes. Arrays and scalars replace.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::engine::EngineConfig;
use crate::constants::{ENV_HISTORY_DIR, ENV_KNOWLEDGEBASE, ENV_LOW_CONFIDENCE_THRESHOLD, ENV_MODEL_PATH};
use crate::logic::error::ConfigError;

/// Recursively merge `overlay` into `base`
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

impl EngineConfig {
    /// Defaults merged with the JSON file at `path`. Not validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut merged = serde_json::to_value(EngineConfig::default()).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        merge_json(&mut merged, overlay);

        serde_json::from_value(merged).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable source (the process environment in
    /// production, a map in tests)
    pub fn apply_overrides<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(ENV_MODEL_PATH) {
            self.classifier.model_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty(ENV_KNOWLEDGEBASE) {
            self.knowledgebase_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty(ENV_HISTORY_DIR) {
            self.history.dir = PathBuf::from(path);
        }
        if let Some(raw) = non_empty(ENV_LOW_CONFIDENCE_THRESHOLD) {
            self.fusion.low_confidence_threshold = raw.trim().parse::<f32>().map_err(|e| ConfigError::Env {
                name: ENV_LOW_CONFIDENCE_THRESHOLD.to_string(),
                reason: format!("'{}' is not a number: {}", raw, e),
            })?;
        }
        Ok(())
    }
}

/// Full load: defaults, optional file, process environment, validation
pub fn load(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };

    config.apply_overrides(|name| std::env::var(name).ok())?;
    config.validate()?;

    log::debug!(
        "Configuration {} ready (fingerprint {})",
        config.version,
        config.short_fingerprint()
    );
    Ok(config)
}
