//! Environment Module - Environmental Risk Model
//!
//! Scores temperature, humidity, rainfall and season against ordered
//! threshold rules and maps the total onto a band table.
//!
//! ## Usage
//! ```ignore
//! let model = RiskModel::new(RiskModelConfig::default())?;
//! let risk = model.assess(&sample.readings);
//! ```

pub mod assess;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use assess::RiskModel;
pub use rules::{RiskBand, RiskModelConfig, SeasonScores, ThresholdRule};
pub use types::{EnvironmentalRisk, FactorScore, FactorStatus, Reading, RiskFactor, RiskLevel};
