//! Deterioration Scorer - additive early-warning score
//!
//! Seven independently scored parameters summed into one score. A parameter
//! landing in its extreme band is a red flag and forces the high risk band
//! whatever the total.
//!
//! Band edges are written as in the clinical tables. A reading that falls
//! between two bands (110.5 bpm, 38.05 °C) takes the lower-scoring one.

use tracing::debug;

use crate::types::thresholds::deterioration::{
    EXTREME_POINTS, HIGH_RISK_TOTAL, SUPPLEMENTAL_O2_POINTS,
};
use crate::types::{
    Consciousness, DeteriorationResult, Parameter, ParameterScore, Reassessment, RiskBand,
    VitalSigns,
};

/// Score a vital-sign snapshot.
///
/// A snapshot with none of systolic pressure, heart rate or respiratory rate
/// is not scored: it reports 0 and "Awaiting data" rather than "normal".
pub fn score(vitals: &VitalSigns) -> DeteriorationResult {
    if !vitals.has_core_readings() {
        debug!("Deterioration scoring skipped: no core readings");
        let reassessment = Reassessment::Routine;
        return DeteriorationResult {
            score: 0,
            band: RiskBand::Low,
            assessment: "Awaiting data".to_string(),
            reassessment,
            interval: reassessment.instruction().to_string(),
            red_flag: false,
            awaiting_data: true,
            contributions: Vec::new(),
        };
    }

    let contributions = contributions(vitals);
    let total: u32 = contributions.iter().map(|c| u32::from(c.points)).sum();
    let red_flag = contributions.iter().any(|c| c.extreme);

    let (band, assessment) = if total >= HIGH_RISK_TOTAL || red_flag {
        (RiskBand::High, "Possible clinical deterioration")
    } else if total == 0 {
        (RiskBand::Low, "No deterioration")
    } else {
        (RiskBand::Medium, "Monitor: low score")
    };
    let reassessment = Reassessment::for_score(total);

    debug!(score = total, band = %band, red_flag, "Deterioration scored");
    DeteriorationResult {
        score: total,
        band,
        assessment: assessment.to_string(),
        reassessment,
        interval: reassessment.instruction().to_string(),
        red_flag,
        awaiting_data: false,
        contributions,
    }
}

/// Per-parameter points for every parameter that was recorded.
pub fn contributions(v: &VitalSigns) -> Vec<ParameterScore> {
    let numeric: [(Parameter, Option<f64>, fn(f64) -> u8); 5] = [
        (Parameter::SystolicBp, v.systolic_bp, systolic_points),
        (Parameter::HeartRate, v.heart_rate, heart_rate_points),
        (Parameter::RespRate, v.resp_rate, resp_rate_points),
        (Parameter::Temperature, v.temperature, temperature_points),
        (Parameter::Spo2, v.spo2, spo2_points),
    ];

    let mut scores: Vec<ParameterScore> = numeric
        .into_iter()
        .filter_map(|(parameter, reading, band)| {
            reading.map(|value| {
                let points = band(value);
                ParameterScore { parameter, points, extreme: points == EXTREME_POINTS }
            })
        })
        .collect();

    let consciousness = consciousness_points(v.consciousness);
    scores.push(ParameterScore {
        parameter: Parameter::Consciousness,
        points: consciousness,
        extreme: consciousness == EXTREME_POINTS,
    });

    if v.supplemental_oxygen {
        scores.push(ParameterScore {
            parameter: Parameter::SupplementalOxygen,
            points: SUPPLEMENTAL_O2_POINTS,
            extreme: false,
        });
    }

    scores
}

/// Systolic BP (mmHg): ≤90 → 3, 91-100 → 2, 101-110 → 1, 111-219 → 0, ≥220 → 3
pub fn systolic_points(sbp: f64) -> u8 {
    if sbp <= 90.0 {
        3
    } else if sbp <= 100.0 {
        2
    } else if sbp <= 110.0 {
        1
    } else if sbp < 220.0 {
        0
    } else {
        3
    }
}

/// Heart rate (bpm): ≤40 → 3, 41-50 → 2, 51-90 → 1, 91-110 → 0, 111-130 → 1, ≥131 → 3
pub fn heart_rate_points(hr: f64) -> u8 {
    if hr <= 40.0 {
        3
    } else if hr <= 50.0 {
        2
    } else if hr <= 90.0 {
        1
    } else if hr < 111.0 {
        0
    } else if hr < 131.0 {
        1
    } else {
        3
    }
}

/// Respiratory rate (/min): ≤8 → 3, 9-11 → 1, 12-20 → 0, 21-24 → 2, ≥25 → 3
pub fn resp_rate_points(rr: f64) -> u8 {
    if rr <= 8.0 {
        3
    } else if rr <= 11.0 {
        1
    } else if rr < 21.0 {
        0
    } else if rr < 25.0 {
        2
    } else {
        3
    }
}

/// Temperature (°C): ≤35.0 → 3, 35.1-36.0 → 1, 36.1-38.0 → 0, 38.1-39.0 → 1, ≥39.1 → 2
pub fn temperature_points(t: f64) -> u8 {
    if t <= 35.0 {
        3
    } else if t <= 36.0 {
        1
    } else if t < 38.1 {
        0
    } else if t < 39.1 {
        1
    } else {
        2
    }
}

/// Saturation (%): ≤91 → 3, 92-93 → 2, 94-95 → 1, ≥96 → 0
pub fn spo2_points(spo2: f64) -> u8 {
    if spo2 <= 91.0 {
        3
    } else if spo2 <= 93.0 {
        2
    } else if spo2 <= 95.0 {
        1
    } else {
        0
    }
}

pub fn consciousness_points(level: Consciousness) -> u8 {
    match level {
        Consciousness::Alert => 0,
        Consciousness::Confused => 1,
        Consciousness::Pain => 2,
        Consciousness::Unresponsive => 3,
    }
}
