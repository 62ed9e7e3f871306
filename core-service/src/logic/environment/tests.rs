//! Environmental Risk Tests

use super::*;
use crate::logic::sample::{EnvironmentalReadings, Season};

fn model() -> RiskModel {
    RiskModel::new(RiskModelConfig::default()).unwrap()
}

#[test]
fn test_all_missing_is_low_and_flagged() {
    let risk = model().assess(&EnvironmentalReadings::default());

    assert_eq!(risk.level, RiskLevel::Low);
    assert_eq!(risk.score, 0.0);
    assert_eq!(risk.factors.len(), 4);
    assert!(risk.factors.iter().all(|f| f.status == FactorStatus::Missing));
    assert_eq!(risk.missing_factors(), RiskFactor::ALL.to_vec());
    assert!(risk.is_indeterminate());
}

#[test]
fn test_favourable_blast_conditions_are_severe() {
    let readings = EnvironmentalReadings::default()
        .with_temperature(28.0)
        .with_humidity(92.0)
        .with_rainfall(60.0)
        .with_season(Season::Wet);
    let risk = model().assess(&readings);

    // 30 + 35 + 20 + 15
    assert_eq!(risk.score, 100.0);
    assert_eq!(risk.level, RiskLevel::Severe);
    assert!(!risk.is_indeterminate());
    assert_eq!(
        risk.factor(RiskFactor::Humidity).and_then(|f| f.rule.clone()).as_deref(),
        Some("saturated ≥90%")
    );
}

#[test]
fn test_first_matching_rule_wins() {
    // 25.0 sits on both the optimal and warm ranges
    let risk = model().assess(&EnvironmentalReadings::default().with_temperature(25.0));
    assert_eq!(risk.factor(RiskFactor::Temperature).unwrap().score, 30.0);

    // 32.0 sits on both the optimal and hot ranges
    let risk = model().assess(&EnvironmentalReadings::default().with_temperature(32.0));
    assert_eq!(risk.factor(RiskFactor::Temperature).unwrap().score, 30.0);
}

#[test]
fn test_unmatched_reading_scores_zero_but_not_missing() {
    let risk = model().assess(&EnvironmentalReadings::default().with_temperature(10.0));
    let temp = risk.factor(RiskFactor::Temperature).unwrap();
    assert_eq!(temp.status, FactorStatus::Scored);
    assert_eq!(temp.score, 0.0);
    assert!(temp.rule.is_none());
    assert!(!risk.is_indeterminate());
}

#[test]
fn test_partial_readings() {
    let readings = EnvironmentalReadings::default()
        .with_humidity(86.0)
        .with_season(Season::Dry);
    let risk = model().assess(&readings);

    assert_eq!(risk.score, 28.0);
    assert_eq!(risk.level, RiskLevel::Moderate);
    assert_eq!(risk.missing_factors(), vec![RiskFactor::Temperature, RiskFactor::Rainfall]);
}

#[test]
fn test_out_of_range_readings_are_clamped() {
    let readings = EnvironmentalReadings::default()
        .with_humidity(140.0)
        .with_rainfall(-5.0);
    let risk = model().assess(&readings);

    let humidity = risk.factor(RiskFactor::Humidity).unwrap();
    assert!(humidity.clamped);
    assert_eq!(risk.measured(RiskFactor::Humidity), Some(100.0));
    assert_eq!(humidity.score, 35.0);

    let rain = risk.factor(RiskFactor::Rainfall).unwrap();
    assert!(rain.clamped);
    assert_eq!(rain.score, 0.0);
}

#[test]
fn test_nan_reading_is_missing() {
    let risk = model().assess(&EnvironmentalReadings::default().with_temperature(f32::NAN));
    assert!(risk.factor(RiskFactor::Temperature).unwrap().is_missing());
}

#[test]
fn test_total_clipped_to_max() {
    let mut config = RiskModelConfig::default();
    config.season.wet = 60.0;
    let model = RiskModel::new(config).unwrap();

    let readings = EnvironmentalReadings::default()
        .with_temperature(28.0)
        .with_humidity(95.0)
        .with_season(Season::Wet);
    let risk = model.assess(&readings);
    assert_eq!(risk.score, 100.0);
    assert_eq!(risk.level, RiskLevel::Severe);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = RiskModelConfig::default();
    config.bands[0].level = RiskLevel::Moderate;
    assert!(RiskModel::new(config).is_err());
}

#[test]
fn test_assess_is_deterministic() {
    let readings = EnvironmentalReadings::default()
        .with_temperature(23.0)
        .with_humidity(75.0)
        .with_rainfall(12.0);
    let m = model();
    let a = serde_json::to_string(&m.assess(&readings)).unwrap();
    let b = serde_json::to_string(&m.assess(&readings)).unwrap();
    assert_eq!(a, b);
}
