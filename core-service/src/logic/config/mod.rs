//! Config Module - Engine Configuration
//!
//! All thresholds and tables the engine runs on, in one versioned value.
//! Loading order: built-in defaults, then an optional JSON file merged over
//! them, then environment overrides, then validation.
//!
//! ## Structure
//! - `engine`: `EngineConfig` and its validation / fingerprint
//! - `loader`: file merge and environment overrides

pub mod engine;
pub mod loader;

#[cfg(test)]
mod tests;

pub use engine::{ClassifierConfig, EngineConfig, HistoryConfig};
pub use loader::{load, merge_json};
