//! Central Configuration Constants
//!
//! Single source of truth for defaults and environment variable names.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PathoTracer";

/// Version of the built-in thresholds and tables
pub const CONFIG_VERSION: &str = "2024.1";

/// History files rotate past this size
pub const HISTORY_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024; // 10 MB

// ============================================
// Environment variables
// ============================================

pub const ENV_CONFIG: &str = "PATHOTRACER_CONFIG";
pub const ENV_MODEL_PATH: &str = "PATHOTRACER_MODEL_PATH";
pub const ENV_KNOWLEDGEBASE: &str = "PATHOTRACER_KNOWLEDGEBASE";
pub const ENV_HISTORY_DIR: &str = "PATHOTRACER_HISTORY_DIR";
pub const ENV_LOW_CONFIDENCE_THRESHOLD: &str = "PATHOTRACER_LOW_CONFIDENCE_THRESHOLD";
pub const ENV_LOG_LEVEL: &str = "PATHOTRACER_LOG_LEVEL";

// ============================================
// Paths
// ============================================

/// Base data directory (falls back to the working directory)
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pathotracer")
}

/// Default decision history directory
pub fn default_history_dir() -> PathBuf {
    data_dir().join("history")
}
