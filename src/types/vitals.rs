//! Vital-sign snapshot: VitalSigns, Consciousness

use serde::{Deserialize, Serialize};

use crate::intake::lenient;

/// Level of consciousness on the ACVPU scale, ordered from best to worst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Consciousness {
    #[default]
    Alert,
    /// New confusion
    Confused,
    /// Responds to pain only
    Pain,
    Unresponsive,
}

impl Consciousness {
    pub fn is_alert(self) -> bool {
        self == Consciousness::Alert
    }

    /// Parse the identifiers upstream forms send (full word or ACVPU letter).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alert" | "a" => Some(Consciousness::Alert),
            "confused" | "c" | "new_confusion" => Some(Consciousness::Confused),
            "pain" | "p" => Some(Consciousness::Pain),
            "unresponsive" | "u" => Some(Consciousness::Unresponsive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Consciousness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consciousness::Alert => write!(f, "Alert"),
            Consciousness::Confused => write!(f, "Confused"),
            Consciousness::Pain => write!(f, "Responds to pain"),
            Consciousness::Unresponsive => write!(f, "Unresponsive"),
        }
    }
}

/// Normal Glasgow coma score, assumed when none is recorded.
pub const GLASGOW_NORMAL: u8 = 15;

/// One vital-sign snapshot, immutable for the duration of an evaluation.
///
/// Numeric readings are `None` when absent or unparseable and are then left
/// out of every threshold check. Intake reads a zero as absent for every
/// reading except `spo2`, where zero is a real critical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalSigns {
    /// Systolic blood pressure (mmHg)
    #[serde(deserialize_with = "lenient::reading")]
    pub systolic_bp: Option<f64>,
    /// Diastolic blood pressure (mmHg)
    #[serde(deserialize_with = "lenient::reading")]
    pub diastolic_bp: Option<f64>,
    /// Heart rate (bpm)
    #[serde(deserialize_with = "lenient::reading")]
    pub heart_rate: Option<f64>,
    /// Respiratory rate (breaths/min)
    #[serde(deserialize_with = "lenient::reading")]
    pub resp_rate: Option<f64>,
    /// Temperature (°C)
    #[serde(deserialize_with = "lenient::reading")]
    pub temperature: Option<f64>,
    /// Oxygen saturation (%)
    #[serde(deserialize_with = "lenient::saturation")]
    pub spo2: Option<f64>,
    #[serde(deserialize_with = "lenient::consciousness")]
    pub consciousness: Consciousness,
    /// Patient is on supplemental oxygen
    #[serde(deserialize_with = "lenient::flag")]
    pub supplemental_oxygen: bool,
    /// Pain intensity 0-10
    #[serde(deserialize_with = "lenient::pain_level")]
    pub pain: Option<u8>,
    /// Glasgow coma score 3-15
    #[serde(deserialize_with = "lenient::glasgow")]
    pub glasgow: u8,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            systolic_bp: None,
            diastolic_bp: None,
            heart_rate: None,
            resp_rate: None,
            temperature: None,
            spo2: None,
            consciousness: Consciousness::Alert,
            supplemental_oxygen: false,
            pain: None,
            glasgow: GLASGOW_NORMAL,
        }
    }
}

impl VitalSigns {
    /// Whether at least one of systolic pressure, heart rate or respiratory
    /// rate was recorded. Without them a snapshot is not scored.
    pub fn has_core_readings(&self) -> bool {
        self.systolic_bp.is_some() || self.heart_rate.is_some() || self.resp_rate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_empty_and_normal() {
        let v = VitalSigns::default();
        assert!(!v.has_core_readings());
        assert_eq!(v.glasgow, 15);
        assert!(v.consciousness.is_alert());
        assert!(!v.supplemental_oxygen);
    }

    #[test]
    fn test_consciousness_parse_accepts_letters() {
        assert_eq!(Consciousness::parse("A"), Some(Consciousness::Alert));
        assert_eq!(Consciousness::parse(" c "), Some(Consciousness::Confused));
        assert_eq!(Consciousness::parse("Pain"), Some(Consciousness::Pain));
        assert_eq!(Consciousness::parse("U"), Some(Consciousness::Unresponsive));
        assert_eq!(Consciousness::parse("drowsy"), None);
    }

    #[test]
    fn test_consciousness_is_ordered_by_severity() {
        assert!(Consciousness::Alert < Consciousness::Confused);
        assert!(Consciousness::Pain < Consciousness::Unresponsive);
    }

    #[test]
    fn test_single_core_reading_counts() {
        let v = VitalSigns { resp_rate: Some(18.0), ..Default::default() };
        assert!(v.has_core_readings());
    }
}
