//! Protocol Trigger Evaluator - stroke, chest pain, sepsis, severe pain
//!
//! The four protocols are evaluated independently. Any combination may fire
//! and none suppresses another.

use tracing::debug;

use crate::types::thresholds::{pain_protocol, sepsis_protocol};
use crate::types::{ProtocolAlert, ProtocolKind, Symptom, SymptomGroup, SymptomSet, VitalSigns};

/// Evaluate every protocol against the same snapshot. Alerts come back in a
/// fixed order: stroke, chest pain, sepsis, pain.
pub fn evaluate(vitals: &VitalSigns, symptoms: &SymptomSet) -> Vec<ProtocolAlert> {
    let alerts: Vec<ProtocolAlert> = [
        stroke(symptoms),
        chest_pain(symptoms),
        sepsis(vitals, symptoms),
        pain(vitals),
    ]
    .into_iter()
    .flatten()
    .collect();

    debug!(
        fired = ?alerts.iter().map(|a| a.protocol).collect::<Vec<_>>(),
        "Protocol triggers evaluated"
    );
    alerts
}

/// Any single neurological sign fires the stroke pathway.
pub fn stroke(symptoms: &SymptomSet) -> Option<ProtocolAlert> {
    let reasons: Vec<String> = symptoms
        .in_group(SymptomGroup::Neurological)
        .map(|s| s.label().to_string())
        .collect();
    if reasons.is_empty() {
        return None;
    }
    Some(ProtocolAlert::new(ProtocolKind::Stroke, reasons))
}

/// Fires on any major symptom, or on a conditional symptom together with an
/// associated one. Reasons list every cardiac symptom selected.
pub fn chest_pain(symptoms: &SymptomSet) -> Option<ProtocolAlert> {
    let major = symptoms.has_any(SymptomGroup::CardiacMajor);
    let conditional = symptoms.has_any(SymptomGroup::CardiacConditional);
    let associated = symptoms.has_any(SymptomGroup::CardiacAssociated);

    if !(major || (conditional && associated)) {
        return None;
    }

    let reasons = [
        SymptomGroup::CardiacMajor,
        SymptomGroup::CardiacConditional,
        SymptomGroup::CardiacAssociated,
    ]
    .into_iter()
    .flat_map(|group| symptoms.in_group(group))
    .map(|s| s.label().to_string())
    .collect();
    Some(ProtocolAlert::new(ProtocolKind::ChestPain, reasons))
}

/// SIRS criteria met, as reason strings.
fn sirs_criteria(v: &VitalSigns) -> Vec<String> {
    let mut met = Vec::new();
    if let Some(t) = v.temperature {
        if t >= sepsis_protocol::TEMP_FEVER || t < sepsis_protocol::TEMP_HYPOTHERMIA {
            met.push(format!("Temperature {t} °C"));
        }
    }
    if let Some(hr) = v.heart_rate {
        if hr > sepsis_protocol::HR_MAX {
            met.push(format!("Heart rate {hr} bpm > {}", sepsis_protocol::HR_MAX));
        }
    }
    if let Some(rr) = v.resp_rate {
        if rr > sepsis_protocol::RR_MAX {
            met.push(format!("Respiratory rate {rr}/min > {}", sepsis_protocol::RR_MAX));
        }
    }
    met
}

/// Organ dysfunction criteria met, as reason strings.
fn dysfunction_criteria(v: &VitalSigns, symptoms: &SymptomSet) -> Vec<String> {
    let mut met = Vec::new();
    if let Some(sbp) = v.systolic_bp {
        if sbp < sepsis_protocol::SBP_MIN {
            met.push(format!("Systolic BP {sbp} mmHg < {}", sepsis_protocol::SBP_MIN));
        }
    }
    match v.spo2 {
        Some(spo2) if spo2 < sepsis_protocol::SPO2_MIN => {
            met.push(format!("SpO2 {spo2}% < {}%", sepsis_protocol::SPO2_MIN));
        }
        _ if v.supplemental_oxygen => met.push("Requires supplemental oxygen".to_string()),
        _ => {}
    }
    if !v.consciousness.is_alert() {
        met.push(format!("Altered consciousness: {}", v.consciousness));
    }
    if symptoms.contains(Symptom::ReducedUrineOutput) {
        met.push(Symptom::ReducedUrineOutput.label().to_string());
    }
    met
}

/// Three gates, any of which fires:
/// (a) suspected infection with ≥2 SIRS or organ dysfunction
/// (b) ≥2 SIRS with altered consciousness
/// (c) ≥2 SIRS on supplemental oxygen
pub fn sepsis(vitals: &VitalSigns, symptoms: &SymptomSet) -> Option<ProtocolAlert> {
    let sirs = sirs_criteria(vitals);
    let dysfunction = dysfunction_criteria(vitals, symptoms);
    let sirs_positive = sirs.len() >= sepsis_protocol::MIN_SIRS;
    let infection = symptoms.contains(Symptom::SuspectedInfection);

    let mut gates = Vec::new();
    if infection && (sirs_positive || !dysfunction.is_empty()) {
        gates.push("Suspected infection with SIRS or organ dysfunction".to_string());
    }
    if sirs_positive && !vitals.consciousness.is_alert() {
        gates.push("SIRS with altered consciousness".to_string());
    }
    if sirs_positive && vitals.supplemental_oxygen {
        gates.push("SIRS with supplemental oxygen requirement".to_string());
    }
    if gates.is_empty() {
        return None;
    }

    let mut reasons = gates;
    if sirs_positive {
        reasons.push(format!("SIRS criteria ({}): {}", sirs.len(), sirs.join(", ")));
    }
    if !dysfunction.is_empty() {
        reasons.push(format!("Organ dysfunction: {}", dysfunction.join(", ")));
    }
    Some(ProtocolAlert::new(ProtocolKind::Sepsis, reasons))
}

/// Pain ≥8 fires on its own; pain of exactly 7 fires only with at least one
/// vital-sign exceedance, which are listed as reasons.
pub fn pain(vitals: &VitalSigns) -> Option<ProtocolAlert> {
    let level = vitals.pain?;
    if level >= pain_protocol::SEVERE_PAIN {
        return Some(ProtocolAlert::new(
            ProtocolKind::Pain,
            vec![format!("Pain level {level}/10")],
        ));
    }
    if level != pain_protocol::BORDERLINE_PAIN {
        return None;
    }

    let mut exceeded = Vec::new();
    if let Some(sbp) = vitals.systolic_bp.filter(|&x| x > pain_protocol::SBP_MAX) {
        exceeded.push(format!("Systolic BP {sbp} mmHg > {}", pain_protocol::SBP_MAX));
    }
    if let Some(dbp) = vitals.diastolic_bp.filter(|&x| x > pain_protocol::DBP_MAX) {
        exceeded.push(format!("Diastolic BP {dbp} mmHg > {}", pain_protocol::DBP_MAX));
    }
    if let Some(spo2) = vitals.spo2.filter(|&x| x < pain_protocol::SPO2_MIN) {
        exceeded.push(format!("SpO2 {spo2}% < {}%", pain_protocol::SPO2_MIN));
    }
    if let Some(hr) = vitals.heart_rate.filter(|&x| x > pain_protocol::HR_MAX) {
        exceeded.push(format!("Heart rate {hr} bpm > {}", pain_protocol::HR_MAX));
    }
    if let Some(rr) = vitals.resp_rate.filter(|&x| x > pain_protocol::RR_MAX) {
        exceeded.push(format!("Respiratory rate {rr}/min > {}", pain_protocol::RR_MAX));
    }
    if exceeded.is_empty() {
        return None;
    }

    let mut reasons = vec![format!("Pain level {level}/10 with abnormal vital signs")];
    reasons.extend(exceeded);
    Some(ProtocolAlert::new(ProtocolKind::Pain, reasons))
}
