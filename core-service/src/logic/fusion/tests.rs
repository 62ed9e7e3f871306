//! Fusion Engine Tests

use super::*;
use crate::logic::environment::{EnvironmentalRisk, RiskLevel, RiskModel};
use crate::logic::error::ConfigError;
use crate::logic::knowledgebase::{seeded, Knowledgebase, RecordSource, ResistanceRating, ResistanceRecord};
use crate::logic::model::{Pathogen, PathogenPrediction};
use crate::logic::sample::EnvironmentalReadings;

fn engine() -> FusionEngine {
    FusionEngine::new(FusionConfig::default(), "test").unwrap()
}

fn record(rating: ResistanceRating) -> ResistanceRecord {
    ResistanceRecord::exact("Test Variety", Pathogen::Blast, rating)
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_every_pair_yields_table_level() {
    let engine = engine();
    let prediction = PathogenPrediction::new(Pathogen::Blast, 0.8);

    for rating in ResistanceRating::ALL {
        for risk in RiskLevel::ALL {
            let decision = engine.decide(&prediction, &record(rating), &EnvironmentalRisk::fixed(risk, 50.0));
            assert_eq!(decision.level, engine.matrix().level(rating, risk));
            assert!(RecommendationLevel::ALL.contains(&decision.level));
            assert_eq!(decision.resistance, rating);
            assert_eq!(decision.risk, risk);
        }
    }
}

#[test]
fn test_decide_is_idempotent() {
    let engine = engine();
    let prediction = PathogenPrediction::new(Pathogen::SheathBlight, 0.42);
    let resistance = record(ResistanceRating::Susceptible);
    let risk = RiskModel::default().assess(
        &EnvironmentalReadings::default()
            .with_temperature(29.0)
            .with_humidity(88.0),
    );

    let a = serde_json::to_vec(&engine.decide(&prediction, &resistance, &risk)).unwrap();
    let b = serde_json::to_vec(&engine.decide(&prediction, &resistance, &risk)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_monotone_in_susceptibility() {
    let engine = engine();
    let prediction = PathogenPrediction::new(Pathogen::Blast, 0.9);

    for risk in RiskLevel::ALL {
        let levels: Vec<RecommendationLevel> = ResistanceRating::ORDERED
            .iter()
            .map(|r| engine.decide(&prediction, &record(*r), &EnvironmentalRisk::fixed(risk, 0.0)).level)
            .collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]), "{:?} at {}", levels, risk);
    }
}

#[test]
fn test_confidence_never_exceeds_classifier() {
    let engine = engine();
    let indeterminate = RiskModel::default().assess(&EnvironmentalReadings::default());

    for pathogen in [Pathogen::Blast, Pathogen::BacterialBlight, Pathogen::Unknown] {
        for step in 0..=10 {
            let prediction = PathogenPrediction::new(pathogen, step as f32 / 10.0);
            for rating in ResistanceRating::ALL {
                for risk in [EnvironmentalRisk::fixed(RiskLevel::High, 60.0), indeterminate.clone()] {
                    let decision = engine.decide(&prediction, &record(rating), &risk);
                    assert!(decision.confidence <= prediction.confidence + f32::EPSILON);
                    assert!((0.0..=1.0).contains(&decision.confidence));
                }
            }
        }
    }
}

#[test]
fn test_missing_data_caps_confidence() {
    let engine = engine();
    let prediction = PathogenPrediction::new(Pathogen::Blast, 0.6);

    // Unknown rating at confidence 0.6 is below the missing-data conflict threshold
    let decision = engine.decide(
        &prediction,
        &record(ResistanceRating::Unknown),
        &EnvironmentalRisk::fixed(RiskLevel::Moderate, 30.0),
    );
    assert!(!decision.conflict);
    assert!((decision.confidence - 0.4).abs() < 1e-6);
    assert_eq!(decision.confidence_rating, ConfidenceRating::Low);

    let indeterminate = RiskModel::default().assess(&EnvironmentalReadings::default());
    let decision = engine.decide(&prediction, &record(ResistanceRating::ModeratelyResistant), &indeterminate);
    assert!(decision.confidence <= 0.4);
}

// ============================================================================
// CONFLICTS
// ============================================================================

#[test]
fn test_low_confidence_urgent_conflict() {
    let engine = engine();
    let prediction = PathogenPrediction::new(Pathogen::Blast, 0.3);
    let decision = engine.decide(
        &prediction,
        &record(ResistanceRating::HighlySusceptible),
        &EnvironmentalRisk::fixed(RiskLevel::High, 70.0),
    );

    assert_eq!(decision.level, RecommendationLevel::Urgent);
    assert!(decision.has_conflict(ConflictKind::LowConfidenceUrgent));
    assert!(decision
        .conflict_explanation
        .as_deref()
        .is_some_and(|e| e.contains("below 0.50")));
    assert!((decision.confidence - 0.3 * 0.75).abs() < 1e-6);
    // Urgent line and confirmation line lead the guidance
    assert_eq!(decision.guidance.len(), 5);
    assert!(decision.guidance[0].starts_with("Immediate intervention"));
}

#[test]
fn test_missing_resistance_conflict() {
    let engine = engine();
    let decision = engine.decide(
        &PathogenPrediction::new(Pathogen::Blast, 0.85),
        &record(ResistanceRating::Unknown),
        &EnvironmentalRisk::fixed(RiskLevel::Moderate, 40.0),
    );
    assert_eq!(decision.conflicts, vec![ConflictKind::MissingResistanceData]);
    // capped at 0.4, then the conflict factor
    assert!((decision.confidence - 0.3).abs() < 1e-6);
}

#[test]
fn test_divergence_conflict_toggle() {
    let prediction = PathogenPrediction::new(Pathogen::Blast, 0.9);
    let resistance = record(ResistanceRating::Susceptible);
    let low = EnvironmentalRisk::fixed(RiskLevel::Low, 5.0);

    let decision = engine().decide(&prediction, &resistance, &low);
    assert_eq!(decision.conflicts, vec![ConflictKind::ResistanceRiskDivergence]);
    assert!(decision
        .conflict_explanation
        .as_deref()
        .is_some_and(|e| e.contains("susceptible variety under low")));

    let quiet = FusionEngine::new(FusionConfig::lenient(), "test").unwrap();
    assert!(!quiet.decide(&prediction, &resistance, &low).conflict);

    let severe = EnvironmentalRisk::fixed(RiskLevel::Severe, 95.0);
    let decision = engine().decide(&prediction, &record(ResistanceRating::Resistant), &severe);
    assert!(decision.has_conflict(ConflictKind::ResistanceRiskDivergence));
}

#[test]
fn test_conflict_lowers_confidence_rating() {
    let engine = engine();
    let susceptible = record(ResistanceRating::Susceptible);
    let consistent = EnvironmentalRisk::fixed(RiskLevel::High, 70.0);
    let diverging = EnvironmentalRisk::fixed(RiskLevel::Low, 5.0);

    for confidence in [1.0, 0.9, 0.8, 0.7, 0.6] {
        let prediction = PathogenPrediction::new(Pathogen::Blast, confidence);
        let clean = engine.decide(&prediction, &susceptible, &consistent);
        let conflicted = engine.decide(&prediction, &susceptible, &diverging);

        assert!(!clean.conflict);
        assert!(conflicted.conflict);
        assert!(
            conflicted.confidence_rating < clean.confidence_rating,
            "confidence {}: {} vs {}",
            confidence,
            conflicted.confidence_rating,
            clean.confidence_rating
        );
    }

    let full = engine.decide(&PathogenPrediction::new(Pathogen::Blast, 1.0), &susceptible, &diverging);
    assert_eq!(full.confidence, 0.75);
    assert_eq!(full.confidence_rating, ConfidenceRating::Medium);
}

#[test]
fn test_conflict_factor_of_one_rejected() {
    let config = FusionConfig {
        conflict_confidence_factor: 1.0,
        ..FusionConfig::default()
    };
    assert!(matches!(
        FusionEngine::new(config, "bad"),
        Err(ConfigError::Threshold { name: "conflict_confidence_factor", .. })
    ));
}

#[test]
fn test_no_conflict_for_consistent_signals() {
    let decision = engine().decide(
        &PathogenPrediction::new(Pathogen::SheathBlight, 0.8),
        &record(ResistanceRating::ModeratelyResistant),
        &EnvironmentalRisk::fixed(RiskLevel::Moderate, 40.0),
    );
    assert!(!decision.conflict);
    assert!(decision.conflicts.is_empty());
    assert!(decision.conflict_explanation.is_none());
    assert_eq!(decision.confidence, 0.8);
    assert_eq!(decision.confidence_rating, ConfidenceRating::High);
    assert_eq!(decision.action, "Preventive Action");
    assert_eq!(decision.config_version, "test");
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = FusionConfig::default();
    config.priority_table.cells.truncate(10);
    assert!(FusionEngine::new(config, "bad").is_err());

    let config = FusionConfig {
        conflict_confidence_factor: -0.1,
        ..FusionConfig::default()
    };
    assert!(FusionEngine::new(config, "bad").is_err());
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_scenario_susceptible_variety_high_risk() {
    let kb = seeded().unwrap();
    let resistance = kb.lookup("IR64", Pathogen::Blast);
    assert_eq!(resistance.rating, ResistanceRating::Susceptible);

    let decision = engine().decide(
        &PathogenPrediction::new(Pathogen::Blast, 0.9),
        &resistance,
        &EnvironmentalRisk::fixed(RiskLevel::High, 70.0),
    );
    assert!(decision.level >= RecommendationLevel::High);
    assert!(!decision.conflict);
    assert_eq!(decision.action, "Urgent Monitoring");
    assert!(decision.guidance.iter().any(|g| g.contains("Rice Blast")));
}

#[test]
fn test_scenario_unknown_pathogen() {
    let kb = seeded().unwrap();
    let prediction = PathogenPrediction::new(Pathogen::Unknown, 0.0);
    let resistance = kb.lookup("IR64", prediction.pathogen);
    let risk = EnvironmentalRisk::fixed(RiskLevel::Moderate, 35.0);

    let decision = engine().decide(&prediction, &resistance, &risk);
    assert_eq!(decision.confidence, 0.0);
    assert!(decision.conflict);
    assert!(decision.has_conflict(ConflictKind::UnidentifiedPathogen));
    assert_eq!(decision.action, LAB_ANALYSIS_ACTION);
    assert_eq!(decision.guidance[1], "Submit sample for laboratory analysis");
}

#[test]
fn test_scenario_unknown_variety() {
    let kb = seeded().unwrap();
    let resistance = kb.lookup("Heirloom Red", Pathogen::BacterialBlight);
    assert_eq!(resistance.rating, ResistanceRating::Unknown);
    assert_eq!(resistance.source, RecordSource::Fallback);
    assert!(!resistance.note.is_empty());

    let decision = engine().decide(
        &PathogenPrediction::new(Pathogen::BacterialBlight, 0.8),
        &resistance,
        &EnvironmentalRisk::fixed(RiskLevel::Low, 10.0),
    );
    assert_eq!(decision.resistance, ResistanceRating::Unknown);
    assert_eq!(
        decision.level,
        engine().baseline(ResistanceRating::Unknown, RiskLevel::Low)
    );
    assert!(decision.has_conflict(ConflictKind::MissingResistanceData));
}
