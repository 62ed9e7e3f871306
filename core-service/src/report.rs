//! Plain-text rendering for the CLI

use pathotracer_core::logic::environment::{EnvironmentalRisk, FactorStatus, RiskLevel};
use pathotracer_core::logic::fusion::PriorityMatrix;
use pathotracer_core::logic::history::DecisionRecord;
use pathotracer_core::logic::knowledgebase::{BreedingRecommendation, ResistanceRecord};
use pathotracer_core::DiagnosisOutcome;

pub fn outcome(o: &DiagnosisOutcome) -> String {
    let d = &o.decision;
    let mut out = String::new();

    out.push_str(&format!("Sample      : {} ({})\n", o.sample.display_id(), o.sample.variety.trim()));
    out.push_str(&format!(
        "Pathogen    : {} [{} via {}]\n",
        d.pathogen,
        d.pathogen.scientific_name(),
        o.prediction.method
    ));
    out.push_str(&format!("Resistance  : {} ({})\n", d.resistance, o.resistance.note));
    out.push_str(&format!("Risk        : {} ({:.0}/{:.0})\n", d.risk, o.risk.score, o.risk.max_score));
    out.push_str(&format!("Level       : {}\n", d.level));
    out.push_str(&format!("Action      : {}\n", d.action));
    out.push_str(&format!("Confidence  : {:.0}% ({})\n", d.confidence * 100.0, d.confidence_rating));

    if let Some(explanation) = &d.conflict_explanation {
        out.push_str(&format!("Conflict    : {}\n", explanation));
    }

    if !d.guidance.is_empty() {
        out.push_str("Guidance    :\n");
        for line in &d.guidance {
            out.push_str(&format!("  - {}\n", line));
        }
    }

    out.push_str(&format!("Config      : {}\n", d.config_version));
    out
}

pub fn risk(r: &EnvironmentalRisk) -> String {
    let mut out = format!("Risk: {} ({:.0}/{:.0})\n", r.level, r.score, r.max_score);
    for f in &r.factors {
        let line = match f.status {
            FactorStatus::Missing => format!("  {:<12} missing\n", f.factor.as_str()),
            FactorStatus::Scored => format!(
                "  {:<12} {}{}{:>6.1}  {}\n",
                f.factor.as_str(),
                f.reading.map(|v| v.to_string()).unwrap_or_default(),
                f.factor.unit(),
                f.score,
                match (&f.rule, f.clamped) {
                    (Some(rule), true) => format!("{} (clamped)", rule),
                    (Some(rule), false) => rule.clone(),
                    (None, true) => "no rule (clamped)".to_string(),
                    (None, false) => "no rule".to_string(),
                }
            ),
        };
        out.push_str(&line);
    }
    out
}

pub fn resistance(r: &ResistanceRecord) -> String {
    let score = r.score.map(|s| format!(" score {:.1}/10", s)).unwrap_or_default();
    format!(
        "{} / {}: {}{} [{:?}]\n  {}\n",
        r.variety, r.pathogen, r.rating, score, r.source, r.note
    )
}

pub fn breeding(recs: &[BreedingRecommendation]) -> String {
    if recs.is_empty() {
        return "No scored resistance profiles on record\n".to_string();
    }
    recs.iter()
        .map(|r| {
            format!(
                "[{:<6}] {:<17} mean {:.2} sd {:.2} (n={})\n  {}\n",
                r.priority.as_str(),
                r.pathogen.as_str(),
                r.mean_score, r.std_dev, r.varieties_screened, r.recommendation
            )
        })
        .collect()
}

pub fn history(records: &[DecisionRecord]) -> String {
    if records.is_empty() {
        return "No decisions recorded\n".to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{}  {:<12} {:<10} {:<17} {:<8} {}{}\n",
                r.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                r.sample.display_id(),
                r.sample.variety,
                r.decision.pathogen.as_str(),
                r.decision.level.as_str(),
                r.decision.action,
                if r.decision.conflict { "  (conflict)" } else { "" }
            )
        })
        .collect()
}

pub fn priority_table(matrix: &PriorityMatrix) -> String {
    let mut out = format!("{:<22}", "rating \\ risk");
    for level in RiskLevel::ALL {
        out.push_str(&format!("{:<10}", level.as_str()));
    }
    out.push('\n');
    for (rating, levels) in matrix.rows() {
        out.push_str(&format!("{:<22}", rating.as_str()));
        for level in levels {
            out.push_str(&format!("{:<10}", level.as_str()));
        }
        out.push('\n');
    }
    out
}
