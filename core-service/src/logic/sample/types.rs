//! Sample Types
//!
//! Field sample as submitted by the UI/CLI collaborator.
//! No logic here - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEASON
// ============================================================================

/// Cropping season tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Wet,
    Dry,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Wet => "wet",
            Season::Dry => "dry",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wet" | "rainy" | "monsoon" => Some(Season::Wet),
            "dry" => Some(Season::Dry),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// GROWTH STAGE
// ============================================================================

/// Rice growth stage at collection time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seedling,
    Tillering,
    StemElongation,
    Booting,
    Heading,
    Flowering,
    GrainFilling,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 8] = [
        GrowthStage::Seedling,
        GrowthStage::Tillering,
        GrowthStage::StemElongation,
        GrowthStage::Booting,
        GrowthStage::Heading,
        GrowthStage::Flowering,
        GrowthStage::GrainFilling,
        GrowthStage::Maturity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Tillering => "tillering",
            GrowthStage::StemElongation => "stem_elongation",
            GrowthStage::Booting => "booting",
            GrowthStage::Heading => "heading",
            GrowthStage::Flowering => "flowering",
            GrowthStage::GrainFilling => "grain_filling",
            GrowthStage::Maturity => "maturity",
        }
    }

    /// 1-based ordinal, used as the feature value (0 = not reported)
    pub fn ordinal(&self) -> u8 {
        match self {
            GrowthStage::Seedling => 1,
            GrowthStage::Tillering => 2,
            GrowthStage::StemElongation => 3,
            GrowthStage::Booting => 4,
            GrowthStage::Heading => 5,
            GrowthStage::Flowering => 6,
            GrowthStage::GrainFilling => 7,
            GrowthStage::Maturity => 8,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.ordinal() == ordinal)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.iter().copied().find(|s| s.as_str() == key)
    }

    /// Reproductive stages where grain infection is possible
    pub fn is_reproductive(&self) -> bool {
        matches!(self, GrowthStage::Flowering | GrowthStage::GrainFilling)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ENVIRONMENTAL READINGS
// ============================================================================

/// Field conditions at collection time. Every reading is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReadings {
    /// Air temperature (°C)
    #[serde(default)]
    pub temperature_c: Option<f32>,
    /// Relative humidity (%)
    #[serde(default)]
    pub humidity_pct: Option<f32>,
    /// Rainfall over the observation window (mm)
    #[serde(default)]
    pub rainfall_mm: Option<f32>,
    #[serde(default)]
    pub season: Option<Season>,
}

impl EnvironmentalReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, celsius: f32) -> Self {
        self.temperature_c = Some(celsius);
        self
    }

    pub fn with_humidity(mut self, percent: f32) -> Self {
        self.humidity_pct = Some(percent);
        self
    }

    pub fn with_rainfall(mut self, mm: f32) -> Self {
        self.rainfall_mm = Some(mm);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    /// True when no reading at all was supplied
    pub fn is_empty(&self) -> bool {
        self.temperature_c.is_none()
            && self.humidity_pct.is_none()
            && self.rainfall_mm.is_none()
            && self.season.is_none()
    }
}

// ============================================================================
// SAMPLE INPUT
// ============================================================================

/// A diagnosis request. Immutable once submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleInput {
    /// Caller-assigned sample identifier
    #[serde(default)]
    pub sample_id: Option<String>,
    /// Rice variety (cultivar) name
    pub variety: String,
    #[serde(default)]
    pub readings: EnvironmentalReadings,
    #[serde(default)]
    pub growth_stage: Option<GrowthStage>,
    /// Free-text symptom description
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SampleInput {
    pub fn new(variety: &str) -> Self {
        Self {
            variety: variety.to_string(),
            ..Default::default()
        }
    }

    pub fn with_sample_id(mut self, id: &str) -> Self {
        self.sample_id = Some(id.to_string());
        self
    }

    pub fn with_readings(mut self, readings: EnvironmentalReadings) -> Self {
        self.readings = readings;
        self
    }

    pub fn with_growth_stage(mut self, stage: GrowthStage) -> Self {
        self.growth_stage = Some(stage);
        self
    }

    pub fn with_symptoms(mut self, symptoms: &str) -> Self {
        self.symptoms = Some(symptoms.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Label used in log lines
    pub fn display_id(&self) -> &str {
        self.sample_id.as_deref().unwrap_or("<unnamed>")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_builder() {
        let sample = SampleInput::new("IR64")
            .with_sample_id("S-001")
            .with_readings(EnvironmentalReadings::new().with_temperature(28.0).with_season(Season::Wet))
            .with_growth_stage(GrowthStage::Heading)
            .with_symptoms("leaf spots on upper leaves");

        assert_eq!(sample.variety, "IR64");
        assert_eq!(sample.display_id(), "S-001");
        assert_eq!(sample.readings.temperature_c, Some(28.0));
        assert_eq!(sample.readings.season, Some(Season::Wet));
        assert_eq!(sample.growth_stage, Some(GrowthStage::Heading));
    }

    #[test]
    fn test_parse_growth_stage() {
        assert_eq!(GrowthStage::parse("Grain filling"), Some(GrowthStage::GrainFilling));
        assert_eq!(GrowthStage::parse("stem-elongation"), Some(GrowthStage::StemElongation));
        assert_eq!(GrowthStage::parse("ripening"), None);
    }

    #[test]
    fn test_growth_stage_ordinal_roundtrip() {
        for stage in GrowthStage::ALL {
            assert_eq!(GrowthStage::from_ordinal(stage.ordinal()), Some(stage));
        }
        assert_eq!(GrowthStage::from_ordinal(0), None);
    }

    #[test]
    fn test_sample_json_defaults() {
        let sample: SampleInput = serde_json::from_str(r#"{"variety": "PSB Rc82"}"#).unwrap();
        assert_eq!(sample.variety, "PSB Rc82");
        assert!(sample.readings.is_empty());
        assert!(sample.symptoms.is_none());
    }
}
