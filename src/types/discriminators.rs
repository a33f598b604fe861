//! Clinician-observed severity discriminators
//!
//! Each finding is a named boolean in a fixed group so that every flag maps
//! to exactly one justification label.

use serde::{Deserialize, Serialize};

/// Number of distinct resources the patient is expected to need.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceNeed {
    #[default]
    None,
    One,
    #[serde(alias = "many")]
    TwoOrMore,
}

impl std::fmt::Display for ResourceNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceNeed::None => write!(f, "no resources"),
            ResourceNeed::One => write!(f, "one resource"),
            ResourceNeed::TwoOrMore => write!(f, "two or more resources"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NeuroFlags {
    pub acute_confusion: bool,
    /// Severe or sudden-onset headache
    pub severe_headache: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SepsisFlags {
    pub suspected_infection: bool,
    pub immunosuppressed: bool,
    pub perfusion_issues: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CardiacFlags {
    pub typical_chest_pain: bool,
    /// Atypical pain together with associated symptoms
    pub atypical_with_associated: bool,
    pub high_risk_chest_pain: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RespiratoryFlags {
    pub dyspnea_risk: bool,
    pub respiratory_distress: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PediatricFlags {
    pub dehydration: bool,
    pub lethargy: bool,
    pub high_risk_fever: bool,
}

/// Full discriminator input of the severity classifier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscriminatorSet {
    /// Unstable airway, breathing or circulation
    pub abc_unstable: bool,
    pub high_risk: bool,
    pub resources: ResourceNeed,
    pub neuro: NeuroFlags,
    pub sepsis: SepsisFlags,
    pub cardiac: CardiacFlags,
    pub respiratory: RespiratoryFlags,
    pub pediatric: PediatricFlags,
}
