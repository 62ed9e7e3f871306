//! Environmental Risk Types

use serde::{Deserialize, Serialize};

use crate::logic::sample::Season;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Disease-favourability band, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High, RiskLevel::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FACTORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Temperature,
    Humidity,
    Rainfall,
    Season,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 4] = [
        RiskFactor::Temperature,
        RiskFactor::Humidity,
        RiskFactor::Rainfall,
        RiskFactor::Season,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::Temperature => "temperature",
            RiskFactor::Humidity => "humidity",
            RiskFactor::Rainfall => "rainfall",
            RiskFactor::Season => "season",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            RiskFactor::Temperature => "°C",
            RiskFactor::Humidity => "%",
            RiskFactor::Rainfall => "mm",
            RiskFactor::Season => "",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorStatus {
    Scored,
    Missing,
}

/// Value a factor was scored on (after clamping)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Measured(f32),
    Season(Season),
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reading::Measured(v) => write!(f, "{:.1}", v),
            Reading::Season(s) => write!(f, "{}", s),
        }
    }
}

/// One factor's contribution to the risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: RiskFactor,
    pub status: FactorStatus,
    pub reading: Option<Reading>,
    pub score: f32,
    /// Reading was outside the plausible range and got clamped
    #[serde(default)]
    pub clamped: bool,
    /// Label of the rule that matched
    pub rule: Option<String>,
}

impl FactorScore {
    pub fn missing(factor: RiskFactor) -> Self {
        Self {
            factor,
            status: FactorStatus::Missing,
            reading: None,
            score: 0.0,
            clamped: false,
            rule: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.status == FactorStatus::Missing
    }
}

// ============================================================================
// ENVIRONMENTAL RISK
// ============================================================================

/// Result of one risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRisk {
    pub level: RiskLevel,
    pub score: f32,
    pub max_score: f32,
    pub factors: Vec<FactorScore>,
}

impl EnvironmentalRisk {
    pub fn factor(&self, factor: RiskFactor) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == factor)
    }

    /// Clamped numeric reading for a factor, if it was present
    pub fn measured(&self, factor: RiskFactor) -> Option<f32> {
        match self.factor(factor)?.reading? {
            Reading::Measured(v) => Some(v),
            Reading::Season(_) => None,
        }
    }

    pub fn missing_factors(&self) -> Vec<RiskFactor> {
        self.factors.iter().filter(|f| f.is_missing()).map(|f| f.factor).collect()
    }

    /// No factor had a reading; the level carries no information
    pub fn is_indeterminate(&self) -> bool {
        self.factors.iter().all(FactorScore::is_missing)
    }

    /// Fixed risk with no factor breakdown, for tests and fixtures
    pub fn fixed(level: RiskLevel, score: f32) -> Self {
        Self {
            level,
            score,
            max_score: 100.0,
            factors: RiskFactor::ALL
                .iter()
                .map(|factor| FactorScore {
                    factor: *factor,
                    status: FactorStatus::Scored,
                    reading: None,
                    score: 0.0,
                    clamped: false,
                    rule: None,
                })
                .collect(),
        }
    }
}
