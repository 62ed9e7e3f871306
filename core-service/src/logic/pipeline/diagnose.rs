use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logic::config::EngineConfig;
use crate::logic::environment::{EnvironmentalRisk, RiskModel};
use crate::logic::error::{ConfigError, EngineResult};
use crate::logic::features;
use crate::logic::fusion::{DiagnosisDecision, FusionEngine};
use crate::logic::knowledgebase::{self, Knowledgebase, ResistanceRecord};
use crate::logic::model::{ClassifierAdapter, OnnxPathogenModel, PathogenModel, PathogenPrediction, RuleBasedModel};
use crate::logic::sample::{validate_sample, SampleInput};

/// Everything produced for one sample. The decision is what gets stored;
/// the rest is context for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisOutcome {
    pub sample: SampleInput,
    pub prediction: PathogenPrediction,
    pub resistance: ResistanceRecord,
    pub risk: EnvironmentalRisk,
    pub decision: DiagnosisDecision,
}

pub struct DiagnosisPipeline {
    adapter: ClassifierAdapter,
    knowledgebase: Arc<dyn Knowledgebase>,
    risk_model: RiskModel,
    engine: FusionEngine,
}

impl DiagnosisPipeline {
    pub fn new(
        adapter: ClassifierAdapter,
        knowledgebase: Arc<dyn Knowledgebase>,
        risk_model: RiskModel,
        engine: FusionEngine,
    ) -> Self {
        Self {
            adapter,
            knowledgebase,
            risk_model,
            engine,
        }
    }

    /// Build every component from a configuration. Fails only on bad config.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let model: Box<dyn PathogenModel> = match &config.classifier.model_path {
            Some(path) => {
                let onnx = OnnxPathogenModel::load(path)
                    .map_err(|e| ConfigError::Model(format!("{}: {}", path.display(), e)))?;
                log::info!("ONNX classifier loaded from {}", path.display());
                Box::new(onnx)
            }
            None => {
                log::info!("No classifier model configured - using rule-based model");
                Box::new(RuleBasedModel::new())
            }
        };

        let knowledgebase: Arc<dyn Knowledgebase> =
            Arc::new(knowledgebase::load(config.knowledgebase_path.as_deref())?);

        Ok(Self::new(
            ClassifierAdapter::new(model),
            knowledgebase,
            RiskModel::new(config.risk.clone())?,
            FusionEngine::new(config.fusion.clone(), config.version.clone())?,
        ))
    }

    pub fn knowledgebase(&self) -> &Arc<dyn Knowledgebase> {
        &self.knowledgebase
    }

    pub fn risk_model(&self) -> &RiskModel {
        &self.risk_model
    }

    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    pub fn classifier_name(&self) -> &str {
        self.adapter.model_name()
    }

    /// Run one sample through every stage.
    ///
    /// Only input validation can fail here; classifier trouble shows up as
    /// an `unknown` prediction inside the outcome.
    pub fn diagnose(&self, sample: &SampleInput) -> EngineResult<DiagnosisOutcome> {
        validate_sample(sample)?;

        let features = features::extract(sample);
        let prediction = self.adapter.predict(&features);
        if prediction.is_degraded() {
            log::warn!(
                "Sample {}: prediction degraded ({})",
                sample.display_id(),
                prediction.degraded.as_deref().unwrap_or("unknown reason")
            );
        }

        let resistance = self.knowledgebase.lookup(&sample.variety, prediction.pathogen);
        let risk = self.risk_model.assess(&sample.readings);
        let decision = self.engine.decide(&prediction, &resistance, &risk);

        log::info!(
            "Sample {}: {} ({:.0}%) on {} -> {} [{}]",
            sample.display_id(),
            decision.pathogen,
            decision.confidence * 100.0,
            sample.variety.trim(),
            decision.level,
            if decision.conflict { "conflict" } else { "consistent" }
        );

        Ok(DiagnosisOutcome {
            sample: sample.clone(),
            prediction,
            resistance,
            risk,
            decision,
        })
    }
}
