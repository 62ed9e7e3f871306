//! Config Tests

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::json;
use tempfile::tempdir;

use super::*;
use crate::constants::CONFIG_VERSION;
use crate::logic::error::ConfigError;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_default_config_validates() {
    let config = EngineConfig::default();
    assert_eq!(config.version, CONFIG_VERSION);
    assert!(config.validate().is_ok());
    assert!(config.classifier.model_path.is_none());
}

#[test]
fn test_merge_json_nested() {
    let mut base = json!({"a": {"b": 1, "c": 2}, "d": [1, 2]});
    merge_json(&mut base, json!({"a": {"c": 3}, "d": [9], "e": true}));
    assert_eq!(base, json!({"a": {"b": 1, "c": 3}, "d": [9], "e": true}));
}

#[test]
fn test_partial_file_merges_over_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"version": "field-2025", "risk": {"season": {"wet": 20.0}}, "fusion": {"high_confidence_threshold": 0.8}}"#,
    )
    .unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config.version, "field-2025");
    assert_eq!(config.risk.season.wet, 20.0);
    assert_eq!(config.risk.season.dry, 0.0);
    assert_eq!(config.risk.humidity.len(), 3);
    assert_eq!(config.fusion.high_confidence_threshold, 0.8);
    assert_eq!(config.fusion.low_confidence_threshold, 0.5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_and_malformed_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        EngineConfig::from_file(&dir.path().join("absent.json")),
        Err(ConfigError::Io { .. })
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "[").unwrap();
    assert!(matches!(EngineConfig::from_file(&bad), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_invalid_bands_in_file_fail_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"risk": {"bands": [{"upper_bound": 50.0, "level": "low"}, {"upper_bound": 40.0, "level": "high"}]}}"#,
    )
    .unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::RiskBands(_))));
}

#[test]
fn test_env_overrides() {
    let mut config = EngineConfig::default();
    config
        .apply_overrides(vars(&[
            ("PATHOTRACER_MODEL_PATH", "/models/rice.onnx"),
            ("PATHOTRACER_HISTORY_DIR", "/tmp/pt-history"),
            ("PATHOTRACER_LOW_CONFIDENCE_THRESHOLD", " 0.35 "),
            ("PATHOTRACER_KNOWLEDGEBASE", ""),
        ]))
        .unwrap();

    assert_eq!(config.classifier.model_path, Some(PathBuf::from("/models/rice.onnx")));
    assert_eq!(config.history.dir, PathBuf::from("/tmp/pt-history"));
    assert_eq!(config.fusion.low_confidence_threshold, 0.35);
    // Empty values are ignored
    assert!(config.knowledgebase_path.is_none());
}

#[test]
fn test_env_override_not_a_number() {
    let mut config = EngineConfig::default();
    let err = config
        .apply_overrides(vars(&[("PATHOTRACER_LOW_CONFIDENCE_THRESHOLD", "high")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Env { .. }));
}

#[test]
fn test_fingerprint_tracks_tables_not_paths() {
    let base = EngineConfig::default();
    let fp = base.fingerprint();
    assert_eq!(fp.len(), 64);
    assert_eq!(fp, EngineConfig::default().fingerprint());

    let mut moved = base.clone();
    moved.history.dir = PathBuf::from("/elsewhere");
    assert_eq!(moved.fingerprint(), fp);

    let mut tuned = base.clone();
    tuned.fusion.conflict_confidence_factor = 0.6;
    assert_ne!(tuned.fingerprint(), fp);

    assert_eq!(base.short_fingerprint().len(), 12);
}
