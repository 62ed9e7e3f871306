//! Pathogen Profiles
//!
//! Reference sheet per pathogen: names, type, typical symptoms and standard
//! management practices.

use serde::Serialize;

use crate::logic::model::Pathogen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathogenType {
    Fungal,
    Bacterial,
    Unknown,
}

impl PathogenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathogenType::Fungal => "fungal",
            PathogenType::Bacterial => "bacterial",
            PathogenType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PathogenProfile {
    pub pathogen: Pathogen,
    pub common_name: &'static str,
    pub scientific_name: &'static str,
    pub pathogen_type: PathogenType,
    pub symptoms: &'static [&'static str],
    pub management: &'static [&'static str],
}

static BLAST: PathogenProfile = PathogenProfile {
    pathogen: Pathogen::Blast,
    common_name: "Rice Blast",
    scientific_name: "Magnaporthe oryzae",
    pathogen_type: PathogenType::Fungal,
    symptoms: &["leaf spots", "neck rot", "panicle blast"],
    management: &[
        "Use resistant varieties",
        "Apply fungicides at early growth stages",
        "Improve field drainage",
        "Balanced fertilization",
    ],
};

static SHEATH_BLIGHT: PathogenProfile = PathogenProfile {
    pathogen: Pathogen::SheathBlight,
    common_name: "Sheath Blight",
    scientific_name: "Rhizoctonia solani",
    pathogen_type: PathogenType::Fungal,
    symptoms: &["sheath lesions", "yellowing"],
    management: &[
        "Reduce plant density",
        "Balanced nitrogen application",
        "Apply fungicides at tillering stage",
        "Improve air circulation",
    ],
};

static BACTERIAL_BLIGHT: PathogenProfile = PathogenProfile {
    pathogen: Pathogen::BacterialBlight,
    common_name: "Bacterial Leaf Blight",
    scientific_name: "Xanthomonas oryzae",
    pathogen_type: PathogenType::Bacterial,
    symptoms: &["leaf blight", "yellowing", "wilting"],
    management: &[
        "Use certified seeds",
        "Apply copper-based bactericides",
        "Avoid excessive nitrogen",
        "Manage water levels",
    ],
};

/// Unidentified pathogen: steps toward a laboratory diagnosis
static UNKNOWN: PathogenProfile = PathogenProfile {
    pathogen: Pathogen::Unknown,
    common_name: "Unknown Disease",
    scientific_name: "Unknown pathogen",
    pathogen_type: PathogenType::Unknown,
    symptoms: &[],
    management: &[
        "Submit sample for laboratory analysis",
        "Monitor field conditions closely",
        "Apply general fungicide as precaution",
        "Consult agricultural extension officer",
    ],
};

pub fn profile(pathogen: Pathogen) -> &'static PathogenProfile {
    match pathogen {
        Pathogen::Blast => &BLAST,
        Pathogen::SheathBlight => &SHEATH_BLIGHT,
        Pathogen::BacterialBlight => &BACTERIAL_BLIGHT,
        Pathogen::Unknown => &UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pathogen_has_profile() {
        for pathogen in [
            Pathogen::Blast,
            Pathogen::SheathBlight,
            Pathogen::BacterialBlight,
            Pathogen::Unknown,
        ] {
            let p = profile(pathogen);
            assert_eq!(p.pathogen, pathogen);
            assert!(!p.management.is_empty());
            assert_eq!(p.scientific_name, pathogen.scientific_name());
        }
    }
}
