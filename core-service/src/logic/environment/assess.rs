//! Risk Assessment
//!
//! Pure scoring of environmental readings against a validated
//! `RiskModelConfig`. Missing readings score 0 and are flagged; nothing here
//! fails once the model is built.

use super::rules::{plausible_range, RiskModelConfig};
use super::types::{EnvironmentalRisk, FactorScore, FactorStatus, Reading, RiskFactor};
use crate::logic::error::ConfigError;
use crate::logic::sample::EnvironmentalReadings;

#[derive(Debug, Clone)]
pub struct RiskModel {
    config: RiskModelConfig,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            config: RiskModelConfig::default(),
        }
    }
}

impl RiskModel {
    pub fn new(config: RiskModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskModelConfig {
        &self.config
    }

    pub fn assess(&self, readings: &EnvironmentalReadings) -> EnvironmentalRisk {
        let factors = vec![
            self.score_numeric(RiskFactor::Temperature, readings.temperature_c),
            self.score_numeric(RiskFactor::Humidity, readings.humidity_pct),
            self.score_numeric(RiskFactor::Rainfall, readings.rainfall_mm),
            self.score_season(readings),
        ];

        let total: f32 = factors.iter().map(|f| f.score).sum();
        let score = total.min(self.config.max_score);
        let level = self.config.level_for(score);

        log::debug!(
            "Risk assessed: score={:.1} level={} missing={}",
            score,
            level,
            factors.iter().filter(|f| f.is_missing()).count()
        );

        EnvironmentalRisk {
            level,
            score,
            max_score: self.config.max_score,
            factors,
        }
    }

    fn score_numeric(&self, factor: RiskFactor, raw: Option<f32>) -> FactorScore {
        let Some(raw) = raw.filter(|v| !v.is_nan()) else {
            return FactorScore::missing(factor);
        };

        let (value, clamped) = match plausible_range(factor) {
            Some((lo, hi)) => {
                let v = raw.clamp(lo, hi);
                (v, v != raw)
            }
            None => (raw, false),
        };
        if clamped {
            log::warn!("{} reading {} clamped to {}", factor, raw, value);
        }

        let rule = self.config.rules(factor).iter().find(|rule| rule.matches(value));

        FactorScore {
            factor,
            status: FactorStatus::Scored,
            reading: Some(Reading::Measured(value)),
            score: rule.map_or(0.0, |r| r.score),
            clamped,
            rule: rule.map(|r| r.label.clone()),
        }
    }

    fn score_season(&self, readings: &EnvironmentalReadings) -> FactorScore {
        match readings.season {
            Some(season) => FactorScore {
                factor: RiskFactor::Season,
                status: FactorStatus::Scored,
                reading: Some(Reading::Season(season)),
                score: self.config.season.score(season),
                clamped: false,
                rule: Some(format!("{} season", season)),
            },
            None => FactorScore::missing(RiskFactor::Season),
        }
    }
}
