// libs/directory-cell/src/services/symptoms.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{DirectoryError, Symptom};

/// Regions of the body selector shown on the symptom screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPart {
    Head,
    Neck,
    Chest,
    Abdomen,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Back,
    General,
}

impl BodyPart {
    pub const ALL: [BodyPart; 10] = [
        BodyPart::Head,
        BodyPart::Neck,
        BodyPart::Chest,
        BodyPart::Abdomen,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
        BodyPart::Back,
        BodyPart::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Neck => "neck",
            BodyPart::Chest => "chest",
            BodyPart::Abdomen => "abdomen",
            BodyPart::LeftArm => "left-arm",
            BodyPart::RightArm => "right-arm",
            BodyPart::LeftLeg => "left-leg",
            BodyPart::RightLeg => "right-leg",
            BodyPart::Back => "back",
            BodyPart::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Head => "Head",
            BodyPart::Neck => "Neck",
            BodyPart::Chest => "Chest",
            BodyPart::Abdomen => "Abdomen",
            BodyPart::LeftArm => "Left Arm",
            BodyPart::RightArm => "Right Arm",
            BodyPart::LeftLeg => "Left Leg",
            BodyPart::RightLeg => "Right Leg",
            BodyPart::Back => "Back",
            BodyPart::General => "General",
        }
    }

    /// Complaint labels offered when this region is tapped.
    pub fn complaints(&self) -> &'static [&'static str] {
        match self {
            BodyPart::Head => &["headache", "dizziness", "migraine"],
            BodyPart::Neck => &["neck-pain", "stiff-neck"],
            BodyPart::Chest => &["chest-pain", "breathing-issues", "heart-palpitations"],
            BodyPart::Abdomen => &["stomach-pain", "nausea", "bloating"],
            BodyPart::LeftArm | BodyPart::RightArm => &["arm-pain", "numbness", "weakness"],
            BodyPart::LeftLeg | BodyPart::RightLeg => &["leg-pain", "swelling", "cramps"],
            BodyPart::Back => &["back-pain", "lower-back-pain", "muscle-strain"],
            BodyPart::General => &["general-checkup", "routine-checkup", "health-screening"],
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        BodyPart::ALL
            .iter()
            .copied()
            .find(|part| part.as_str() == tag)
            .ok_or_else(|| DirectoryError::UnknownBodyPart(s.to_string()))
    }
}

/// Map a complaint label from the body selector onto the symptom vocabulary.
pub fn resolve_complaint(label: &str) -> Option<Symptom> {
    let label = label.trim().to_lowercase();

    let symptom = match label.as_str() {
        "dizziness" | "migraine" | "neck-pain" | "stiff-neck" => Symptom::Headache,
        "breathing-issues" | "heart-palpitations" => Symptom::ChestPain,
        "stomach-pain" | "nausea" | "bloating" => Symptom::Fever,
        "arm-pain" | "numbness" | "weakness" | "leg-pain" | "swelling" | "cramps"
        | "lower-back-pain" | "muscle-strain" => Symptom::BackPain,
        "routine-checkup" | "health-screening" => Symptom::GeneralCheckup,
        other => return other.parse().ok(),
    };

    Some(symptom)
}
