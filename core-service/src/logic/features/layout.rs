//! Feature Layout - classifier input schema
//!
//! Position, name and meaning of every slot in a `FeatureVector`. Any change
//! to the list (adding, removing, reordering) bumps `FEATURE_VERSION`; the
//! CRC over version and names lets a model manifest prove it was trained
//! against the same schema.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FEATURE_VERSION: u8 = 1;

/// Slot order of the vector. Readings are 0 when absent; the presence
/// mask tells the model which zeros are real.
pub const FEATURE_LAYOUT: &[&str] = &[
    // readings
    "temperature_c",
    "humidity_pct",
    "rainfall_mm",
    // presence mask
    "temperature_present",
    "humidity_present",
    "rainfall_present",
    // calendar
    "wet_season",
    "growth_stage",
    // symptom keywords, same order as SYMPTOM_KEYWORDS
    "symptom_leaf_spots",
    "symptom_neck_rot",
    "symptom_panicle_blast",
    "symptom_sheath_lesions",
    "symptom_yellowing",
    "symptom_wilting",
    "symptom_leaf_blight",
];

pub const FEATURE_COUNT: usize = FEATURE_LAYOUT.len();

static LAYOUT_HASH: Lazy<u32> = Lazy::new(|| {
    let mut crc = Hasher::new();
    crc.update(&[FEATURE_VERSION]);
    FEATURE_LAYOUT.iter().for_each(|name| {
        crc.update(name.as_bytes());
        crc.update(b"\0");
    });
    crc.finalize()
});

pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|candidate| *candidate == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "classifier expects feature layout v{actual_version} ({actual_hash:08x}) but this build produces v{expected_version} ({expected_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Schema stamp carried in model manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn check(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.hash)
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    let expected_hash = layout_hash();
    if version == FEATURE_VERSION && hash == expected_hash {
        Ok(())
    } else {
        Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash,
            actual_version: version,
            actual_hash: hash,
        })
    }
}
