use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::fusion::DiagnosisDecision;
use crate::logic::sample::SampleInput;

/// One line of the decision history. The decision is stored verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecisionRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,

    // Config that produced the decision
    pub config_version: String,
    pub config_fingerprint: String,

    // Request and result
    pub sample: SampleInput,
    pub decision: DiagnosisDecision,
}

impl DecisionRecord {
    pub fn new(sample: SampleInput, decision: DiagnosisDecision, config_fingerprint: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            config_version: decision.config_version.clone(),
            config_fingerprint: config_fingerprint.to_string(),
            sample,
            decision,
        }
    }
}
