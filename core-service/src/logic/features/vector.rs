//! Feature Vector - Classifier input
//!
//! Versioned vector built from a SampleInput, using the layout in `layout.rs`.
//! The classifier adapter hands this to whatever model is loaded; the model
//! never sees the SampleInput itself.

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::logic::sample::{SampleInput, Season};

// ============================================================================
// SYMPTOM KEYWORDS
// ============================================================================

/// (feature name, keywords that switch it on). Matching is case-insensitive.
pub(crate) const SYMPTOM_KEYWORDS: &[(&str, &[&str])] = &[
    ("symptom_leaf_spots", &["leaf spot", "diamond", "eye-shaped"]),
    ("symptom_neck_rot", &["neck rot", "neck blast", "rotten neck"]),
    ("symptom_panicle_blast", &["panicle blast", "panicle rot", "whitehead"]),
    ("symptom_sheath_lesions", &["sheath blight", "sheath lesion", "lesion"]),
    ("symptom_yellowing", &["yellowing", "yellow", "chlorosis"]),
    ("symptom_wilting", &["wilting", "wilt", "kresek"]),
    ("symptom_leaf_blight", &["leaf blight", "blight streak", "bacterial ooze"]),
];

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub version: u8,
    /// Stamp of the layout the vector was built with
    pub layout_hash: u32,
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Zeroed vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Build the vector for one sample
    pub fn from_sample(sample: &SampleInput) -> Self {
        let mut vector = Self::new();
        let readings = &sample.readings;

        let numeric = [
            ("temperature_c", "temperature_present", readings.temperature_c),
            ("humidity_pct", "humidity_present", readings.humidity_pct),
            ("rainfall_mm", "rainfall_present", readings.rainfall_mm),
        ];
        for (value_name, present_name, reading) in numeric {
            if let Some(v) = reading.filter(|v| v.is_finite()) {
                vector.set_by_name(value_name, v);
                vector.set_by_name(present_name, 1.0);
            }
        }

        if readings.season == Some(Season::Wet) {
            vector.set_by_name("wet_season", 1.0);
        }

        if let Some(stage) = sample.growth_stage {
            vector.set_by_name("growth_stage", stage.ordinal() as f32);
        }

        if let Some(text) = sample.symptoms.as_deref() {
            let text = text.to_lowercase();
            for (name, keywords) in SYMPTOM_KEYWORDS {
                if keywords.iter().any(|k| text.contains(k)) {
                    vector.set_by_name(name, 1.0);
                }
            }
        }

        vector
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Reading value, `None` when the presence flag is off
    pub fn reading(&self, value_name: &str, present_name: &str) -> Option<f32> {
        match self.get_by_name(present_name) {
            Some(flag) if flag > 0.5 => self.get_by_name(value_name),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get_by_name(name).map_or(false, |v| v > 0.5)
    }

    pub fn has_any_symptom(&self) -> bool {
        SYMPTOM_KEYWORDS.iter().any(|(name, _)| self.flag(name))
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Non-zero slots by name, for debug logs
    pub fn active(&self) -> Vec<(&'static str, f32)> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values)
            .filter(|(_, value)| *value != 0.0)
            .map(|(name, value)| (*name, value))
            .collect()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
