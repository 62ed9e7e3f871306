//! Guidance Composition
//!
//! Builds the short list of mitigation lines attached to a decision.
//! Order: urgent intervention, conflict confirmation, pathogen management,
//! then condition-specific lines. Capped at `MAX_GUIDANCE_LINES`.

use super::profiles::profile;
use crate::logic::fusion::RecommendationLevel;
use crate::logic::knowledgebase::ResistanceRating;
use crate::logic::model::Pathogen;

pub const MAX_GUIDANCE_LINES: usize = 5;

/// Humidity at or above which ventilation advice is added
pub const VENTILATION_HUMIDITY_PCT: f32 = 85.0;

pub const URGENT_LINE: &str = "Immediate intervention required due to high disease pressure";
pub const CONFIRM_LINE: &str = "Signals disagree; confirm the diagnosis in the field or laboratory before treating";
pub const VENTILATION_LINE: &str = "Improve field ventilation to reduce humidity";

/// Inputs guidance depends on
#[derive(Debug, Clone, Copy)]
pub struct GuidanceContext {
    pub pathogen: Pathogen,
    pub level: RecommendationLevel,
    pub rating: ResistanceRating,
    pub conflict: bool,
    /// Clamped humidity reading, if present
    pub humidity_pct: Option<f32>,
}

pub fn compose(ctx: &GuidanceContext) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(MAX_GUIDANCE_LINES + 3);

    if ctx.level == RecommendationLevel::Urgent {
        lines.push(URGENT_LINE.to_string());
    }
    if ctx.conflict {
        lines.push(CONFIRM_LINE.to_string());
    }

    lines.extend(profile(ctx.pathogen).management.iter().map(|s| s.to_string()));

    if ctx.rating.is_susceptible() && ctx.pathogen.is_known() {
        lines.push(format!(
            "Plan a switch to a variety resistant to {} for the next season",
            profile(ctx.pathogen).common_name
        ));
    }

    if ctx.humidity_pct.is_some_and(|h| h >= VENTILATION_HUMIDITY_PCT) {
        lines.push(VENTILATION_LINE.to_string());
    }

    dedup_in_order(&mut lines);
    lines.truncate(MAX_GUIDANCE_LINES);
    lines
}

fn dedup_in_order(lines: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    lines.retain(|line| seen.insert(line.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pathogen: Pathogen, level: RecommendationLevel) -> GuidanceContext {
        GuidanceContext {
            pathogen,
            level,
            rating: ResistanceRating::Resistant,
            conflict: false,
            humidity_pct: None,
        }
    }

    #[test]
    fn test_plain_management_list() {
        let lines = compose(&ctx(Pathogen::SheathBlight, RecommendationLevel::Moderate));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Reduce plant density");
    }

    #[test]
    fn test_urgent_and_conflict_lead() {
        let mut c = ctx(Pathogen::Blast, RecommendationLevel::Urgent);
        c.conflict = true;
        let lines = compose(&c);
        assert_eq!(lines.len(), MAX_GUIDANCE_LINES);
        assert_eq!(lines[0], URGENT_LINE);
        assert_eq!(lines[1], CONFIRM_LINE);
    }

    #[test]
    fn test_unknown_uses_lab_list() {
        let lines = compose(&ctx(Pathogen::Unknown, RecommendationLevel::Moderate));
        assert_eq!(lines[0], "Submit sample for laboratory analysis");
    }

    #[test]
    fn test_condition_lines_and_cap() {
        let mut c = ctx(Pathogen::BacterialBlight, RecommendationLevel::High);
        c.rating = ResistanceRating::Susceptible;
        c.humidity_pct = Some(90.0);
        let lines = compose(&c);
        // 4 management lines + variety line; ventilation falls past the cap
        assert_eq!(lines.len(), MAX_GUIDANCE_LINES);
        assert!(lines[4].contains("Bacterial Leaf Blight"));

        let mut c = ctx(Pathogen::Unknown, RecommendationLevel::Low);
        c.humidity_pct = Some(88.0);
        let lines = compose(&c);
        assert_eq!(lines.last().map(String::as_str), Some(VENTILATION_LINE));
    }
}
