//! Deterioration scorer output: DeteriorationResult, RiskBand, Reassessment

use serde::{Deserialize, Serialize};

/// Deterioration risk band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "LOW"),
            RiskBand::Medium => write!(f, "MEDIUM"),
            RiskBand::High => write!(f, "HIGH"),
        }
    }
}

/// Recommended reassessment, looked up from the final score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Reassessment {
    /// Score 0 (also used while awaiting data)
    #[default]
    Routine,
    /// Score 1-3
    Regular,
    /// Score 4
    Frequent,
    /// Score 5-6
    Urgent,
    /// Score 7 and above
    Continuous,
}

impl Reassessment {
    pub fn for_score(score: u32) -> Self {
        match score {
            0 => Reassessment::Routine,
            1..=3 => Reassessment::Regular,
            4 => Reassessment::Frequent,
            5 | 6 => Reassessment::Urgent,
            _ => Reassessment::Continuous,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Reassessment::Routine => "Routine monitoring: reassess every 12 hours",
            Reassessment::Regular => "Reassess every 4 to 6 hours",
            Reassessment::Frequent => "Reassess every 2 hours and inform the nurse in charge",
            Reassessment::Urgent => "Reassess hourly and request urgent medical review",
            Reassessment::Continuous => "Continuous monitoring / rapid response team activation",
        }
    }

    pub fn activates_rapid_response(self) -> bool {
        self == Reassessment::Continuous
    }
}

/// Parameters contributing to the deterioration score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    SystolicBp,
    HeartRate,
    RespRate,
    Temperature,
    Spo2,
    Consciousness,
    SupplementalOxygen,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parameter::SystolicBp => write!(f, "Systolic BP"),
            Parameter::HeartRate => write!(f, "Heart rate"),
            Parameter::RespRate => write!(f, "Respiratory rate"),
            Parameter::Temperature => write!(f, "Temperature"),
            Parameter::Spo2 => write!(f, "SpO2"),
            Parameter::Consciousness => write!(f, "Consciousness"),
            Parameter::SupplementalOxygen => write!(f, "Supplemental oxygen"),
        }
    }
}

/// Points one parameter contributed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterScore {
    pub parameter: Parameter,
    pub points: u8,
    /// Landed in its most extreme band (red flag)
    pub extreme: bool,
}

/// Result of one deterioration scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeteriorationResult {
    pub score: u32,
    pub band: RiskBand,
    /// Clinical reading of the score ("No deterioration", ...)
    pub assessment: String,
    pub reassessment: Reassessment,
    /// Reassessment instruction text
    pub interval: String,
    /// A single parameter scored in its extreme band
    pub red_flag: bool,
    /// Too few readings to score
    pub awaiting_data: bool,
    /// Per-parameter points, in scoring order
    pub contributions: Vec<ParameterScore>,
}
