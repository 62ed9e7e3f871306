//! Risk Rules - threshold tables and band table
//!
//! Rules are ordered per factor; the first match wins. Bands map the total
//! score to a level through `{upper_bound: level}` entries.

use serde::{Deserialize, Serialize};

use super::types::{RiskFactor, RiskLevel};
use crate::logic::error::ConfigError;
use crate::logic::sample::Season;

// ============================================================================
// PLAUSIBLE RANGES
// ============================================================================

/// Readings outside these ranges are clamped before scoring
pub const TEMPERATURE_RANGE: (f32, f32) = (-10.0, 50.0);
pub const HUMIDITY_RANGE: (f32, f32) = (0.0, 100.0);
pub const RAINFALL_RANGE: (f32, f32) = (0.0, 1000.0);

pub fn plausible_range(factor: RiskFactor) -> Option<(f32, f32)> {
    match factor {
        RiskFactor::Temperature => Some(TEMPERATURE_RANGE),
        RiskFactor::Humidity => Some(HUMIDITY_RANGE),
        RiskFactor::Rainfall => Some(RAINFALL_RANGE),
        RiskFactor::Season => None,
    }
}

// ============================================================================
// THRESHOLD RULE
// ============================================================================

/// Scores a reading inside `[min, max]`. Missing bounds are open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub label: String,
    #[serde(default)]
    pub min: Option<f32>,
    /// Treat `min` as a strict lower bound
    #[serde(default)]
    pub min_exclusive: bool,
    #[serde(default)]
    pub max: Option<f32>,
    pub score: f32,
}

impl ThresholdRule {
    pub fn between(label: &str, min: f32, max: f32, score: f32) -> Self {
        Self {
            label: label.to_string(),
            min: Some(min),
            min_exclusive: false,
            max: Some(max),
            score,
        }
    }

    pub fn at_least(label: &str, min: f32, score: f32) -> Self {
        Self {
            label: label.to_string(),
            min: Some(min),
            min_exclusive: false,
            max: None,
            score,
        }
    }

    pub fn above(label: &str, min: f32, score: f32) -> Self {
        Self {
            label: label.to_string(),
            min: Some(min),
            min_exclusive: true,
            max: None,
            score,
        }
    }

    pub fn matches(&self, value: f32) -> bool {
        let lower = match self.min {
            Some(min) if self.min_exclusive => value > min,
            Some(min) => value >= min,
            None => true,
        };
        let upper = self.max.map_or(true, |max| value <= max);
        lower && upper
    }
}

/// Season contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonScores {
    pub wet: f32,
    pub dry: f32,
}

impl SeasonScores {
    pub fn score(&self, season: Season) -> f32 {
        match season {
            Season::Wet => self.wet,
            Season::Dry => self.dry,
        }
    }
}

impl Default for SeasonScores {
    fn default() -> Self {
        Self { wet: 15.0, dry: 0.0 }
    }
}

// ============================================================================
// RISK BANDS
// ============================================================================

/// Scores up to and including `upper_bound` map to `level`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub upper_bound: f32,
    pub level: RiskLevel,
}

// ============================================================================
// RISK MODEL CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModelConfig {
    pub max_score: f32,
    pub temperature: Vec<ThresholdRule>,
    pub humidity: Vec<ThresholdRule>,
    pub rainfall: Vec<ThresholdRule>,
    pub season: SeasonScores,
    pub bands: Vec<RiskBand>,
}

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self {
            max_score: 100.0,
            temperature: vec![
                ThresholdRule::between("optimal 25-32°C", 25.0, 32.0, 30.0),
                ThresholdRule::between("warm 20-25°C", 20.0, 25.0, 20.0),
                ThresholdRule::between("hot 32-35°C", 32.0, 35.0, 15.0),
            ],
            humidity: vec![
                ThresholdRule::at_least("saturated ≥90%", 90.0, 35.0),
                ThresholdRule::at_least("very humid ≥85%", 85.0, 28.0),
                ThresholdRule::at_least("humid ≥70%", 70.0, 15.0),
            ],
            rainfall: vec![
                ThresholdRule::above("heavy >50mm", 50.0, 20.0),
                ThresholdRule::above("moderate >10mm", 10.0, 12.0),
                ThresholdRule::above("light >0mm", 0.0, 5.0),
            ],
            season: SeasonScores::default(),
            bands: vec![
                RiskBand { upper_bound: 25.0, level: RiskLevel::Low },
                RiskBand { upper_bound: 50.0, level: RiskLevel::Moderate },
                RiskBand { upper_bound: 75.0, level: RiskLevel::High },
                RiskBand { upper_bound: 100.0, level: RiskLevel::Severe },
            ],
        }
    }
}

impl RiskModelConfig {
    pub fn rules(&self, factor: RiskFactor) -> &[ThresholdRule] {
        match factor {
            RiskFactor::Temperature => &self.temperature,
            RiskFactor::Humidity => &self.humidity,
            RiskFactor::Rainfall => &self.rainfall,
            RiskFactor::Season => &[],
        }
    }

    /// Level for a total score; scores above the last bound use the last band
    pub fn level_for(&self, score: f32) -> RiskLevel {
        self.bands
            .iter()
            .find(|band| score <= band.upper_bound)
            .or_else(|| self.bands.last())
            .map(|band| band.level)
            .unwrap_or(RiskLevel::Low)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(ConfigError::RiskBands(format!(
                "max_score must be positive, got {}",
                self.max_score
            )));
        }

        self.validate_bands()?;

        for factor in [RiskFactor::Temperature, RiskFactor::Humidity, RiskFactor::Rainfall] {
            for rule in self.rules(factor) {
                self.check_score(factor, &rule.label, rule.score)?;
                if let (Some(min), Some(max)) = (rule.min, rule.max) {
                    if min > max {
                        return Err(ConfigError::FactorRules {
                            factor: factor.to_string(),
                            reason: format!("rule '{}' has min {} above max {}", rule.label, min, max),
                        });
                    }
                }
            }
        }

        self.check_score(RiskFactor::Season, "wet", self.season.wet)?;
        self.check_score(RiskFactor::Season, "dry", self.season.dry)?;
        Ok(())
    }

    fn check_score(&self, factor: RiskFactor, label: &str, score: f32) -> Result<(), ConfigError> {
        if !score.is_finite() || score < 0.0 || score > self.max_score {
            return Err(ConfigError::FactorRules {
                factor: factor.to_string(),
                reason: format!("rule '{}' score {} outside 0..={}", label, score, self.max_score),
            });
        }
        Ok(())
    }

    fn validate_bands(&self) -> Result<(), ConfigError> {
        let first = self
            .bands
            .first()
            .ok_or_else(|| ConfigError::RiskBands("band table is empty".to_string()))?;
        if first.level != RiskLevel::Low {
            return Err(ConfigError::RiskBands(format!("first band must be low, got {}", first.level)));
        }

        for pair in self.bands.windows(2) {
            if pair[1].upper_bound <= pair[0].upper_bound {
                return Err(ConfigError::RiskBands(format!(
                    "bounds not ascending at {} -> {}",
                    pair[0].upper_bound, pair[1].upper_bound
                )));
            }
            if pair[1].level <= pair[0].level {
                return Err(ConfigError::RiskBands(format!(
                    "levels not ascending at {} -> {}",
                    pair[0].level, pair[1].level
                )));
            }
        }

        if let Some(last) = self.bands.last() {
            if last.upper_bound != self.max_score {
                return Err(ConfigError::RiskBands(format!(
                    "last bound {} must equal max_score {}",
                    last.upper_bound, self.max_score
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RiskModelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rule_bounds() {
        let rule = ThresholdRule::between("t", 25.0, 32.0, 30.0);
        assert!(rule.matches(25.0));
        assert!(rule.matches(32.0));
        assert!(!rule.matches(32.1));

        let rain = ThresholdRule::above("r", 0.0, 5.0);
        assert!(!rain.matches(0.0));
        assert!(rain.matches(0.1));
    }

    #[test]
    fn test_level_for() {
        let config = RiskModelConfig::default();
        assert_eq!(config.level_for(0.0), RiskLevel::Low);
        assert_eq!(config.level_for(25.0), RiskLevel::Low);
        assert_eq!(config.level_for(25.5), RiskLevel::Moderate);
        assert_eq!(config.level_for(75.0), RiskLevel::High);
        assert_eq!(config.level_for(100.0), RiskLevel::Severe);
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut config = RiskModelConfig::default();
        config.bands.swap(1, 2);
        assert!(matches!(config.validate(), Err(ConfigError::RiskBands(_))));

        let mut config = RiskModelConfig::default();
        config.bands[3].upper_bound = 90.0;
        assert!(config.validate().is_err());

        let mut config = RiskModelConfig::default();
        config.bands.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_rule_score() {
        let mut config = RiskModelConfig::default();
        config.humidity[0].score = 150.0;
        assert!(matches!(config.validate(), Err(ConfigError::FactorRules { .. })));

        let mut config = RiskModelConfig::default();
        config.season.wet = -1.0;
        assert!(config.validate().is_err());
    }
}
