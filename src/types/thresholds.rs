//! Static clinical threshold tables
//!
//! Every cut-off the evaluators use lives here as a process-wide constant.
//! Nothing in this module is configurable at runtime: the same snapshot must
//! always classify the same way.

/// Immediate life-threat thresholds (severity stage 1)
pub mod life_threat {
    /// Saturation strictly below this is critical hypoxia (%)
    pub const CRITICAL_SPO2: f64 = 85.0;
}

/// Adult vital-sign alert thresholds used by the severity discriminator sweep
pub mod adult_vitals {
    /// Heart rate below this raises a vital alert (bpm)
    pub const HR_MIN: f64 = 50.0;
    /// Heart rate above this raises a vital alert (bpm)
    pub const HR_MAX: f64 = 130.0;
    /// Respiratory rate below this raises a vital alert (breaths/min)
    pub const RR_MIN: f64 = 10.0;
    /// Respiratory rate above this raises a vital alert (breaths/min)
    pub const RR_MAX: f64 = 30.0;
    /// Systolic pressure below this raises a vital alert (mmHg)
    pub const SBP_MIN: f64 = 90.0;
    /// Saturation below this raises a vital alert (%)
    pub const SPO2_MIN: f64 = 92.0;
}

/// Age below which the pediatric heart/respiratory-rate table replaces the
/// adult one (months; 18 years).
pub const PEDIATRIC_AGE_LIMIT_MONTHS: u32 = 18 * 12;

/// One row of the pediatric vital-sign table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PediatricBand {
    /// Upper age bound of the band, inclusive (months)
    pub max_age_months: u32,
    /// Display name of the band
    pub label: &'static str,
    pub hr_min: f64,
    pub hr_max: f64,
    /// Respiratory rate above this raises a vital alert
    pub rr_max: f64,
}

/// Pediatric heart-rate bands and respiratory ceilings, ordered by age.
pub static PEDIATRIC_BANDS: [PediatricBand; 5] = [
    PediatricBand { max_age_months: 12, label: "0-1y", hr_min: 100.0, hr_max: 160.0, rr_max: 60.0 },
    PediatricBand { max_age_months: 36, label: "1-3y", hr_min: 90.0, hr_max: 150.0, rr_max: 40.0 },
    PediatricBand { max_age_months: 72, label: "3-6y", hr_min: 80.0, hr_max: 140.0, rr_max: 34.0 },
    PediatricBand { max_age_months: 144, label: "6-12y", hr_min: 70.0, hr_max: 120.0, rr_max: 30.0 },
    PediatricBand {
        max_age_months: PEDIATRIC_AGE_LIMIT_MONTHS - 1,
        label: "12-18y",
        hr_min: 70.0,
        hr_max: 120.0,
        rr_max: 30.0,
    },
];

/// Select the pediatric band for an age. Ages past the last ceiling are
/// adults and never reach here; they fall back to the oldest band.
pub fn pediatric_band(age_months: u32) -> &'static PediatricBand {
    PEDIATRIC_BANDS
        .iter()
        .find(|band| age_months <= band.max_age_months)
        .unwrap_or(&PEDIATRIC_BANDS[PEDIATRIC_BANDS.len() - 1])
}

/// SIRS criteria as used by the severity sepsis discriminator
pub mod severity_sirs {
    pub const TEMP_LOW: f64 = 36.0;
    pub const TEMP_HIGH: f64 = 38.0;
    pub const HR_MAX: f64 = 90.0;
    pub const RR_MAX: f64 = 20.0;
    /// Criteria count needed together with suspected infection
    pub const MIN_CRITERIA: usize = 2;
    /// Fever threshold combined with immunosuppression (°C)
    pub const IMMUNOSUPPRESSED_FEVER: f64 = 38.0;
}

/// Pain thresholds for the severity discriminator sweep
pub mod severity_pain {
    /// Pain strictly above this always fires
    pub const SEVERE_ABOVE: u8 = 7;
    /// Pain exactly at this level fires only alongside a vital alert
    pub const BORDERLINE: u8 = 7;
}

/// Deterioration score constants. The per-parameter band tables live next
/// to their scoring functions in `engine::deterioration`.
pub mod deterioration {
    /// Flat points for supplemental oxygen
    pub const SUPPLEMENTAL_O2_POINTS: u8 = 1;
    /// Points that mark a single parameter as a red flag
    pub const EXTREME_POINTS: u8 = 3;
    /// Total at or above which deterioration risk is high
    pub const HIGH_RISK_TOTAL: u32 = 5;
}

/// Sepsis protocol criteria
pub mod sepsis_protocol {
    /// SIRS temperature: at or above this (°C)
    pub const TEMP_FEVER: f64 = 37.8;
    /// SIRS temperature: below this (°C)
    pub const TEMP_HYPOTHERMIA: f64 = 35.0;
    pub const HR_MAX: f64 = 90.0;
    pub const RR_MAX: f64 = 20.0;
    pub const MIN_SIRS: usize = 2;
    /// Organ dysfunction: systolic below this (mmHg)
    pub const SBP_MIN: f64 = 90.0;
    /// Organ dysfunction: saturation below this (%)
    pub const SPO2_MIN: f64 = 94.0;
}

/// Pain protocol criteria
pub mod pain_protocol {
    /// Pain at or above this fires on its own
    pub const SEVERE_PAIN: u8 = 8;
    /// Pain exactly at this level needs a vital exceedance
    pub const BORDERLINE_PAIN: u8 = 7;
    pub const SBP_MAX: f64 = 150.0;
    pub const DBP_MAX: f64 = 95.0;
    pub const SPO2_MIN: f64 = 94.0;
    pub const HR_MAX: f64 = 90.0;
    pub const RR_MAX: f64 = 22.0;
}
