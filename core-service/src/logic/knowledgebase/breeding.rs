//! Breeding Recommendations
//!
//! Ranks pathogens by how weak the varieties on record are against them.
//! Only exact profiles with a screening score take part.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::store::Knowledgebase;
use crate::logic::model::Pathogen;

/// Mean score below which a pathogen is a high breeding priority
pub const HIGH_PRIORITY_MEAN: f32 = 4.0;
/// Mean score below which a pathogen is a medium breeding priority
pub const MEDIUM_PRIORITY_MEAN: f32 = 6.0;
/// Standard deviation above which varietal spread is called out
pub const HIGH_VARIABILITY_STD: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingPriority {
    High,
    Medium,
    Low,
}

impl BreedingPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingPriority::High => "high",
            BreedingPriority::Medium => "medium",
            BreedingPriority::Low => "low",
        }
    }

    fn from_mean(mean: f32) -> Self {
        if mean < HIGH_PRIORITY_MEAN {
            BreedingPriority::High
        } else if mean < MEDIUM_PRIORITY_MEAN {
            BreedingPriority::Medium
        } else {
            BreedingPriority::Low
        }
    }
}

impl std::fmt::Display for BreedingPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingRecommendation {
    pub pathogen: Pathogen,
    pub priority: BreedingPriority,
    pub mean_score: f32,
    /// Sample standard deviation; 0 with a single variety
    pub std_dev: f32,
    pub varieties_screened: usize,
    pub recommendation: String,
}

/// One recommendation per pathogen with scored profiles, high priority first
pub fn breeding_recommendations(kb: &dyn Knowledgebase) -> Vec<BreedingRecommendation> {
    let mut scores: BTreeMap<Pathogen, Vec<f32>> = BTreeMap::new();
    for record in kb.profiles() {
        if let Some(score) = record.score {
            scores.entry(record.pathogen).or_default().push(score);
        }
    }

    let mut out: Vec<BreedingRecommendation> = scores
        .into_iter()
        .map(|(pathogen, values)| {
            let (mean, std_dev) = mean_and_std(&values);
            let priority = BreedingPriority::from_mean(mean);

            let mut recommendation = match priority {
                BreedingPriority::High => format!(
                    "Prioritize breeding for {} resistance; current varieties average {:.1}/10",
                    pathogen.scientific_name(),
                    mean
                ),
                BreedingPriority::Medium => format!(
                    "Improve {} resistance in the next breeding cycle (average {:.1}/10)",
                    pathogen.scientific_name(),
                    mean
                ),
                BreedingPriority::Low => format!(
                    "Maintain current {} resistance levels (average {:.1}/10)",
                    pathogen.scientific_name(),
                    mean
                ),
            };
            if std_dev > HIGH_VARIABILITY_STD {
                recommendation.push_str("; high varietal variability, select from the best performers");
            }

            BreedingRecommendation {
                pathogen,
                priority,
                mean_score: mean,
                std_dev,
                varieties_screened: values.len(),
                recommendation,
            }
        })
        .collect();

    // Stable sort keeps pathogen order within a priority
    out.sort_by_key(|r| r.priority);
    out
}

fn mean_and_std(values: &[f32]) -> (f32, f32) {
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / (n - 1.0);
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let (mean, std) = mean_and_std(&[2.0, 4.0, 6.0]);
        assert!((mean - 4.0).abs() < 1e-6);
        assert!((std - 2.0).abs() < 1e-6);

        let (mean, std) = mean_and_std(&[5.0]);
        assert_eq!(mean, 5.0);
        assert_eq!(std, 0.0);
    }

    #[test]
    fn test_priority_from_mean() {
        assert_eq!(BreedingPriority::from_mean(3.9), BreedingPriority::High);
        assert_eq!(BreedingPriority::from_mean(4.0), BreedingPriority::Medium);
        assert_eq!(BreedingPriority::from_mean(6.0), BreedingPriority::Low);
    }
}
