//! Priority Table - (resistance rating, risk level) → recommendation level
//!
//! Configured as a flat list of cells so files stay readable and duplicates
//! can be detected. Validation turns it into a dense matrix; lookups on the
//! matrix are total.

use serde::{Deserialize, Serialize};

use super::types::RecommendationLevel;
use crate::logic::environment::RiskLevel;
use crate::logic::error::ConfigError;
use crate::logic::knowledgebase::ResistanceRating;

const RATINGS: usize = ResistanceRating::ALL.len();
const RISKS: usize = RiskLevel::ALL.len();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityCell {
    pub rating: ResistanceRating,
    pub risk: RiskLevel,
    pub level: RecommendationLevel,
}

/// Configured form of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityTable {
    pub cells: Vec<PriorityCell>,
}

impl Default for PriorityTable {
    fn default() -> Self {
        use RecommendationLevel::{High, Low, Moderate, Urgent};

        let rows: [(ResistanceRating, [RecommendationLevel; RISKS]); RATINGS] = [
            (ResistanceRating::Resistant, [Low, Low, Moderate, Moderate]),
            (ResistanceRating::ModeratelyResistant, [Low, Moderate, Moderate, High]),
            (ResistanceRating::Susceptible, [Moderate, Moderate, High, Urgent]),
            (ResistanceRating::HighlySusceptible, [High, High, Urgent, Urgent]),
            (ResistanceRating::Unknown, [Moderate, Moderate, High, Urgent]),
        ];

        Self::from_rows(&rows)
    }
}

impl PriorityTable {
    /// Build from one row per rating, columns in `RiskLevel::ALL` order
    pub fn from_rows(rows: &[(ResistanceRating, [RecommendationLevel; RISKS])]) -> Self {
        let cells = rows
            .iter()
            .flat_map(|(rating, levels)| {
                RiskLevel::ALL.iter().zip(levels.iter()).map(move |(risk, level)| PriorityCell {
                    rating: *rating,
                    risk: *risk,
                    level: *level,
                })
            })
            .collect();
        Self { cells }
    }

    /// Check completeness, uniqueness and monotonicity
    pub fn validate(&self) -> Result<PriorityMatrix, ConfigError> {
        let mut grid: [[Option<RecommendationLevel>; RISKS]; RATINGS] = [[None; RISKS]; RATINGS];

        for cell in &self.cells {
            let slot = &mut grid[rating_index(cell.rating)][risk_index(cell.risk)];
            if slot.is_some() {
                return Err(ConfigError::PriorityTable(format!(
                    "duplicate cell ({}, {})",
                    cell.rating, cell.risk
                )));
            }
            *slot = Some(cell.level);
        }

        let mut levels = [[RecommendationLevel::Low; RISKS]; RATINGS];
        for rating in ResistanceRating::ALL {
            for risk in RiskLevel::ALL {
                levels[rating_index(rating)][risk_index(risk)] = grid[rating_index(rating)][risk_index(risk)]
                    .ok_or_else(|| ConfigError::PriorityTable(format!("missing cell ({}, {})", rating, risk)))?;
            }
        }

        let matrix = PriorityMatrix { levels };

        // Non-decreasing with risk, every row
        for rating in ResistanceRating::ALL {
            for pair in RiskLevel::ALL.windows(2) {
                let (lo, hi) = (matrix.level(rating, pair[0]), matrix.level(rating, pair[1]));
                if hi < lo {
                    return Err(ConfigError::PriorityTable(format!(
                        "{} row decreases from {} risk ({}) to {} risk ({})",
                        rating, pair[0], lo, pair[1], hi
                    )));
                }
            }
        }

        // Non-decreasing with susceptibility, every column
        for risk in RiskLevel::ALL {
            for pair in ResistanceRating::ORDERED.windows(2) {
                let (lo, hi) = (matrix.level(pair[0], risk), matrix.level(pair[1], risk));
                if hi < lo {
                    return Err(ConfigError::PriorityTable(format!(
                        "{} column decreases from {} ({}) to {} ({})",
                        risk, pair[0], lo, pair[1], hi
                    )));
                }
            }
        }

        Ok(matrix)
    }
}

/// Validated, dense priority table
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityMatrix {
    levels: [[RecommendationLevel; RISKS]; RATINGS],
}

impl PriorityMatrix {
    pub fn level(&self, rating: ResistanceRating, risk: RiskLevel) -> RecommendationLevel {
        self.levels[rating_index(rating)][risk_index(risk)]
    }

    /// Rows in `ResistanceRating::ALL` order, for display
    pub fn rows(&self) -> impl Iterator<Item = (ResistanceRating, [RecommendationLevel; RISKS])> + '_ {
        ResistanceRating::ALL
            .iter()
            .map(move |rating| (*rating, self.levels[rating_index(*rating)]))
    }
}

fn rating_index(rating: ResistanceRating) -> usize {
    match rating {
        ResistanceRating::Resistant => 0,
        ResistanceRating::ModeratelyResistant => 1,
        ResistanceRating::Susceptible => 2,
        ResistanceRating::HighlySusceptible => 3,
        ResistanceRating::Unknown => 4,
    }
}

fn risk_index(risk: RiskLevel) -> usize {
    match risk {
        RiskLevel::Low => 0,
        RiskLevel::Moderate => 1,
        RiskLevel::High => 2,
        RiskLevel::Severe => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let matrix = PriorityTable::default().validate().unwrap();
        assert_eq!(
            matrix.level(ResistanceRating::Resistant, RiskLevel::Low),
            RecommendationLevel::Low
        );
        assert_eq!(
            matrix.level(ResistanceRating::HighlySusceptible, RiskLevel::High),
            RecommendationLevel::Urgent
        );
        assert_eq!(
            matrix.level(ResistanceRating::Unknown, RiskLevel::Moderate),
            RecommendationLevel::Moderate
        );
        assert_eq!(matrix.rows().count(), 5);
    }

    #[test]
    fn test_missing_cell_rejected() {
        let mut table = PriorityTable::default();
        table.cells.pop();
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("missing cell"));
    }

    #[test]
    fn test_duplicate_cell_rejected() {
        let mut table = PriorityTable::default();
        let dup = table.cells[0].clone();
        table.cells.push(dup);
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate cell"));
    }

    #[test]
    fn test_non_monotone_risk_rejected() {
        let mut table = PriorityTable::default();
        for cell in table.cells.iter_mut() {
            if cell.rating == ResistanceRating::Unknown && cell.risk == RiskLevel::Severe {
                cell.level = RecommendationLevel::Low;
            }
        }
        assert!(matches!(table.validate(), Err(ConfigError::PriorityTable(_))));
    }

    #[test]
    fn test_non_monotone_susceptibility_rejected() {
        let mut table = PriorityTable::default();
        for cell in table.cells.iter_mut() {
            if cell.rating == ResistanceRating::Resistant && cell.risk == RiskLevel::Low {
                cell.level = RecommendationLevel::High;
            }
        }
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_table_serializes_as_cell_list() {
        let json = serde_json::to_value(PriorityTable::default()).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(20));
    }
}
