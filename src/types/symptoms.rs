//! Protocol symptoms: Symptom, SymptomGroup, SymptomSet
//!
//! The symptom vocabulary is closed. Group membership is a property of the
//! variant, so an identifier either parses to a known symptom or is rejected.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Disjoint symptom namespaces used by the protocol triggers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymptomGroup {
    Neurological,
    /// Cardiac group A: major / typical
    CardiacMajor,
    /// Cardiac group B: conditional / atypical
    CardiacConditional,
    /// Cardiac group C: associated
    CardiacAssociated,
    Infectious,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    // Neurological
    FacialDroop,
    ArmWeakness,
    SpeechDisturbance,
    SuddenVisionLoss,
    SuddenBalanceLoss,
    SuddenSevereHeadache,
    SuddenConfusion,
    // Cardiac A
    OppressiveChestPain,
    RadiatingChestPain,
    ChestPainAtRest,
    // Cardiac B
    AtypicalChestPain,
    EpigastricPain,
    InterscapularPain,
    // Cardiac C
    Diaphoresis,
    Nausea,
    Dyspnea,
    Syncope,
    // Infectious
    SuspectedInfection,
    ReducedUrineOutput,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown symptom identifier '{0}'")]
pub struct SymptomParseError(pub String);

impl Symptom {
    pub const ALL: [Symptom; 19] = [
        Symptom::FacialDroop,
        Symptom::ArmWeakness,
        Symptom::SpeechDisturbance,
        Symptom::SuddenVisionLoss,
        Symptom::SuddenBalanceLoss,
        Symptom::SuddenSevereHeadache,
        Symptom::SuddenConfusion,
        Symptom::OppressiveChestPain,
        Symptom::RadiatingChestPain,
        Symptom::ChestPainAtRest,
        Symptom::AtypicalChestPain,
        Symptom::EpigastricPain,
        Symptom::InterscapularPain,
        Symptom::Diaphoresis,
        Symptom::Nausea,
        Symptom::Dyspnea,
        Symptom::Syncope,
        Symptom::SuspectedInfection,
        Symptom::ReducedUrineOutput,
    ];

    pub fn group(self) -> SymptomGroup {
        use Symptom::*;
        match self {
            FacialDroop | ArmWeakness | SpeechDisturbance | SuddenVisionLoss
            | SuddenBalanceLoss | SuddenSevereHeadache | SuddenConfusion => {
                SymptomGroup::Neurological
            }
            OppressiveChestPain | RadiatingChestPain | ChestPainAtRest => SymptomGroup::CardiacMajor,
            AtypicalChestPain | EpigastricPain | InterscapularPain => {
                SymptomGroup::CardiacConditional
            }
            Diaphoresis | Nausea | Dyspnea | Syncope => SymptomGroup::CardiacAssociated,
            SuspectedInfection | ReducedUrineOutput => SymptomGroup::Infectious,
        }
    }

    /// Stable wire identifier (matches the serde form).
    pub fn id(self) -> &'static str {
        use Symptom::*;
        match self {
            FacialDroop => "facial_droop",
            ArmWeakness => "arm_weakness",
            SpeechDisturbance => "speech_disturbance",
            SuddenVisionLoss => "sudden_vision_loss",
            SuddenBalanceLoss => "sudden_balance_loss",
            SuddenSevereHeadache => "sudden_severe_headache",
            SuddenConfusion => "sudden_confusion",
            OppressiveChestPain => "oppressive_chest_pain",
            RadiatingChestPain => "radiating_chest_pain",
            ChestPainAtRest => "chest_pain_at_rest",
            AtypicalChestPain => "atypical_chest_pain",
            EpigastricPain => "epigastric_pain",
            InterscapularPain => "interscapular_pain",
            Diaphoresis => "diaphoresis",
            Nausea => "nausea",
            Dyspnea => "dyspnea",
            Syncope => "syncope",
            SuspectedInfection => "suspected_infection",
            ReducedUrineOutput => "reduced_urine_output",
        }
    }

    /// Human-readable label used in alert reasons.
    pub fn label(self) -> &'static str {
        use Symptom::*;
        match self {
            FacialDroop => "Facial droop",
            ArmWeakness => "Arm or leg weakness",
            SpeechDisturbance => "Speech disturbance",
            SuddenVisionLoss => "Sudden vision loss",
            SuddenBalanceLoss => "Sudden loss of balance",
            SuddenSevereHeadache => "Sudden severe headache",
            SuddenConfusion => "Sudden confusion",
            OppressiveChestPain => "Oppressive chest pain",
            RadiatingChestPain => "Chest pain radiating to arm, jaw or neck",
            ChestPainAtRest => "Chest pain at rest",
            AtypicalChestPain => "Atypical chest pain",
            EpigastricPain => "Epigastric pain",
            InterscapularPain => "Interscapular pain",
            Diaphoresis => "Diaphoresis",
            Nausea => "Nausea or vomiting",
            Dyspnea => "Dyspnea",
            Syncope => "Syncope",
            SuspectedInfection => "Suspected infection",
            ReducedUrineOutput => "Reduced urine output",
        }
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Symptom {
    type Err = SymptomParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Symptom::ALL
            .iter()
            .copied()
            .find(|sym| sym.id() == wanted)
            .ok_or_else(|| SymptomParseError(s.to_string()))
    }
}

/// Set of checked symptoms. Ordered, so reason lists are stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<Symptom>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symptom: Symptom) -> bool {
        self.0.insert(symptom)
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        self.0.contains(&symptom)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.0.iter().copied()
    }

    /// Members of one group, in declaration order.
    pub fn in_group(&self, group: SymptomGroup) -> impl Iterator<Item = Symptom> + '_ {
        self.iter().filter(move |s| s.group() == group)
    }

    pub fn has_any(&self, group: SymptomGroup) -> bool {
        self.in_group(group).next().is_some()
    }
}

impl FromIterator<Symptom> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
