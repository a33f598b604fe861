//! Severity Classifier - five-level emergency severity
//!
//! Strict pipeline with two early returns:
//! 1. Immediate life threat (ABC instability, critical hypoxia) → level 1
//! 2. Base level from high-risk presentation or expected resources
//! 3. Discriminator sweep (vitals, neuro, sepsis, pain, cardiac, respiratory, pediatric)
//! 4. One-way escalation to level 2 if any discriminator fired
//! 5. Justification assembly

use tracing::debug;

use crate::types::thresholds::{adult_vitals, life_threat, severity_pain, severity_sirs};
use crate::types::{
    CardiacFlags, DiscriminatorSet, NeuroFlags, PatientContext, PediatricFlags, ResourceNeed,
    RespiratoryFlags, SepsisFlags, SeverityLevel, SeverityResult, VitalSigns, GLASGOW_NORMAL,
};

/// Classify emergency severity. Never fails: absent readings contribute no
/// signal, except that any present saturation (zero included) is checked.
pub fn classify(
    patient: &PatientContext,
    vitals: &VitalSigns,
    discriminators: &DiscriminatorSet,
) -> SeverityResult {
    // Stage 1: immediate life threat
    if let Some(reason) = life_threat(vitals, discriminators) {
        debug!(level = 1, reason = %reason, "Severity classified at life-threat stage");
        return SeverityResult::new(SeverityLevel::Resuscitation, vec![reason], Vec::new());
    }

    // Stage 2: base level
    let (base, basis) = base_level(discriminators);

    // Stage 3: discriminator sweep
    let mut fired = Vec::new();
    let vital_alert = check_vitals(patient, vitals, &mut fired);
    check_neuro(vitals, &discriminators.neuro, &mut fired);
    check_sepsis(vitals, &discriminators.sepsis, &mut fired);
    check_pain(vitals, vital_alert, &mut fired);
    check_cardiac(&discriminators.cardiac, &mut fired);
    check_respiratory(&discriminators.respiratory, &mut fired);
    check_pediatric(&discriminators.pediatric, &mut fired);

    // Stage 4: escalation only ever moves towards level 2
    let mut level = base;
    let mut justification = vec![basis];
    if !fired.is_empty() && level > SeverityLevel::Emergent {
        level = SeverityLevel::Emergent;
        justification.push(format!(
            "Escalated from level {} to level 2: {} discriminator(s) positive",
            base.number(),
            fired.len()
        ));
    }

    // Stage 5
    justification.extend(fired.iter().cloned());

    debug!(
        level = level.number(),
        base = base.number(),
        discriminators = fired.len(),
        "Severity classified"
    );
    SeverityResult::new(level, justification, fired)
}

fn life_threat(vitals: &VitalSigns, d: &DiscriminatorSet) -> Option<String> {
    if d.abc_unstable {
        return Some("ABC instability: unstable airway, breathing or circulation".to_string());
    }
    match vitals.spo2 {
        Some(spo2) if spo2 < life_threat::CRITICAL_SPO2 => Some(format!(
            "Critical hypoxia: SpO2 {spo2}% below {}%",
            life_threat::CRITICAL_SPO2
        )),
        _ => None,
    }
}

fn base_level(d: &DiscriminatorSet) -> (SeverityLevel, String) {
    if d.high_risk {
        return (SeverityLevel::Emergent, "High-risk presentation (base level 2)".to_string());
    }
    let level = match d.resources {
        ResourceNeed::None => SeverityLevel::NonUrgent,
        ResourceNeed::One => SeverityLevel::LessUrgent,
        ResourceNeed::TwoOrMore => SeverityLevel::Urgent,
    };
    (level, format!("Expected {} (base level {})", d.resources, level.number()))
}

/// Vital-sign alert check, age-adjusted. Returns whether any alert fired;
/// the pain-at-7 rule reuses this result.
fn check_vitals(patient: &PatientContext, v: &VitalSigns, fired: &mut Vec<String>) -> bool {
    let before = fired.len();

    match patient.pediatric_band() {
        Some(band) => {
            if let Some(hr) = v.heart_rate {
                if hr < band.hr_min || hr > band.hr_max {
                    fired.push(format!(
                        "Heart rate {hr} bpm outside {}-{} (pediatric {})",
                        band.hr_min, band.hr_max, band.label
                    ));
                }
            }
            if let Some(rr) = v.resp_rate {
                if rr > band.rr_max {
                    fired.push(format!(
                        "Respiratory rate {rr}/min above {} (pediatric {})",
                        band.rr_max, band.label
                    ));
                }
            }
        }
        None => {
            if let Some(hr) = v.heart_rate {
                if hr < adult_vitals::HR_MIN || hr > adult_vitals::HR_MAX {
                    fired.push(format!(
                        "Heart rate {hr} bpm outside {}-{}",
                        adult_vitals::HR_MIN,
                        adult_vitals::HR_MAX
                    ));
                }
            }
            if let Some(rr) = v.resp_rate {
                if rr < adult_vitals::RR_MIN || rr > adult_vitals::RR_MAX {
                    fired.push(format!(
                        "Respiratory rate {rr}/min outside {}-{}",
                        adult_vitals::RR_MIN,
                        adult_vitals::RR_MAX
                    ));
                }
            }
        }
    }

    if let Some(sbp) = v.systolic_bp {
        if sbp < adult_vitals::SBP_MIN {
            fired.push(format!("Systolic BP {sbp} mmHg below {}", adult_vitals::SBP_MIN));
        }
    }
    if let Some(spo2) = v.spo2 {
        if spo2 < adult_vitals::SPO2_MIN {
            fired.push(format!("SpO2 {spo2}% below {}%", adult_vitals::SPO2_MIN));
        }
    }

    fired.len() > before
}

fn check_neuro(v: &VitalSigns, flags: &NeuroFlags, fired: &mut Vec<String>) {
    if v.glasgow < GLASGOW_NORMAL {
        fired.push(format!("Glasgow coma score {} below {GLASGOW_NORMAL}", v.glasgow));
    }
    if flags.acute_confusion {
        fired.push("Acute confusion".to_string());
    }
    if flags.severe_headache {
        fired.push("Severe or sudden-onset headache".to_string());
    }
}

/// Number of SIRS criteria met (temperature, heart rate, respiratory rate).
fn sirs_count(v: &VitalSigns) -> usize {
    let temp = v
        .temperature
        .is_some_and(|t| t < severity_sirs::TEMP_LOW || t > severity_sirs::TEMP_HIGH);
    let hr = v.heart_rate.is_some_and(|hr| hr > severity_sirs::HR_MAX);
    let rr = v.resp_rate.is_some_and(|rr| rr > severity_sirs::RR_MAX);
    [temp, hr, rr].into_iter().filter(|&met| met).count()
}

fn check_sepsis(v: &VitalSigns, flags: &SepsisFlags, fired: &mut Vec<String>) {
    let sirs = sirs_count(v);
    if sirs >= severity_sirs::MIN_CRITERIA && flags.suspected_infection {
        fired.push(format!("Possible sepsis: {sirs} SIRS criteria with suspected infection"));
    }
    if flags.immunosuppressed {
        if let Some(t) = v.temperature {
            if t > severity_sirs::IMMUNOSUPPRESSED_FEVER {
                fired.push(format!("Immunosuppressed patient with fever {t} °C"));
            }
        }
    }
    if flags.perfusion_issues {
        fired.push("Signs of poor perfusion".to_string());
    }
}

fn check_pain(v: &VitalSigns, vital_alert: bool, fired: &mut Vec<String>) {
    match v.pain {
        Some(p) if p > severity_pain::SEVERE_ABOVE => {
            fired.push(format!("Severe pain {p}/10"));
        }
        Some(p) if p == severity_pain::BORDERLINE && vital_alert => {
            fired.push(format!("Pain {p}/10 with abnormal vital signs"));
        }
        _ => {}
    }
}

fn check_cardiac(flags: &CardiacFlags, fired: &mut Vec<String>) {
    if flags.typical_chest_pain {
        fired.push("Typical ischemic chest pain".to_string());
    }
    if flags.atypical_with_associated {
        fired.push("Atypical chest pain with associated symptoms".to_string());
    }
    if flags.high_risk_chest_pain {
        fired.push("High-risk chest pain".to_string());
    }
}

fn check_respiratory(flags: &RespiratoryFlags, fired: &mut Vec<String>) {
    if flags.dyspnea_risk {
        fired.push("Dyspnea with risk features".to_string());
    }
    if flags.respiratory_distress {
        fired.push("Respiratory distress".to_string());
    }
}

fn check_pediatric(flags: &PediatricFlags, fired: &mut Vec<String>) {
    if flags.dehydration {
        fired.push("Pediatric dehydration".to_string());
    }
    if flags.lethargy {
        fired.push("Pediatric lethargy".to_string());
    }
    if flags.high_risk_fever {
        fired.push("High-risk pediatric fever".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Age;

    fn adult() -> PatientContext {
        PatientContext::new(Age::years(40))
    }

    fn resources(need: ResourceNeed) -> DiscriminatorSet {
        DiscriminatorSet { resources: need, ..Default::default() }
    }

    #[test]
    fn test_abc_instability_is_level_one() {
        let d = DiscriminatorSet { abc_unstable: true, high_risk: true, ..Default::default() };
        let r = classify(&adult(), &VitalSigns::default(), &d);
        assert_eq!(r.level, SeverityLevel::Resuscitation);
        assert_eq!(r.justification.len(), 1);
        assert!(r.justification[0].starts_with("ABC instability"));
        assert!(r.discriminators.is_empty());
    }

    #[test]
    fn test_zero_saturation_is_critical_hypoxia() {
        let v = VitalSigns { spo2: Some(0.0), ..Default::default() };
        let r = classify(&adult(), &v, &DiscriminatorSet::default());
        assert_eq!(r.level, SeverityLevel::Resuscitation);
        assert!(r.justification[0].starts_with("Critical hypoxia"));
    }

    #[test]
    fn test_saturation_85_is_not_critical() {
        let v = VitalSigns { spo2: Some(85.0), ..Default::default() };
        let r = classify(&adult(), &v, &DiscriminatorSet::default());
        // 85 is below the 92 alert threshold, so escalates to 2 instead
        assert_eq!(r.level, SeverityLevel::Emergent);
    }

    #[test]
    fn test_base_levels_from_resources() {
        let v = VitalSigns::default();
        assert_eq!(classify(&adult(), &v, &resources(ResourceNeed::None)).level, SeverityLevel::NonUrgent);
        assert_eq!(classify(&adult(), &v, &resources(ResourceNeed::One)).level, SeverityLevel::LessUrgent);
        assert_eq!(classify(&adult(), &v, &resources(ResourceNeed::TwoOrMore)).level, SeverityLevel::Urgent);
    }

    #[test]
    fn test_high_risk_overrides_resources() {
        let d = DiscriminatorSet { high_risk: true, resources: ResourceNeed::None, ..Default::default() };
        let r = classify(&adult(), &VitalSigns::default(), &d);
        assert_eq!(r.level, SeverityLevel::Emergent);
        // No escalation note when already at 2
        let d = DiscriminatorSet { respiratory: RespiratoryFlags { respiratory_distress: true, ..Default::default() }, ..d };
        let r = classify(&adult(), &VitalSigns::default(), &d);
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert!(!r.justification.iter().any(|j| j.starts_with("Escalated")));
    }

    #[test]
    fn test_pediatric_heart_rate_escalates() {
        let patient = PatientContext::new(Age::years(8));
        let v = VitalSigns { heart_rate: Some(140.0), resp_rate: Some(25.0), ..Default::default() };
        let r = classify(&patient, &v, &resources(ResourceNeed::One));
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert_eq!(r.discriminators.len(), 1);
        assert!(r.discriminators[0].contains("pediatric 6-12y"));
        assert!(r.justification[1].starts_with("Escalated from level 4"));
    }

    #[test]
    fn test_adolescent_heart_rate_names_adolescent_band() {
        let patient = PatientContext::new(Age::years(16));
        let v = VitalSigns { heart_rate: Some(125.0), ..Default::default() };
        let r = classify(&patient, &v, &resources(ResourceNeed::One));
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert!(r.discriminators[0].contains("pediatric 12-18y"), "{:?}", r.discriminators);
    }

    #[test]
    fn test_same_heart_rate_is_normal_for_adult() {
        let v = VitalSigns { heart_rate: Some(125.0), resp_rate: Some(25.0), ..Default::default() };
        let r = classify(&adult(), &v, &resources(ResourceNeed::One));
        assert_eq!(r.level, SeverityLevel::LessUrgent);
        assert!(r.discriminators.is_empty());
    }

    #[test]
    fn test_sirs_needs_suspected_infection() {
        let v = VitalSigns { temperature: Some(38.6), heart_rate: Some(100.0), ..Default::default() };
        let d = resources(ResourceNeed::None);
        assert_eq!(classify(&adult(), &v, &d).level, SeverityLevel::NonUrgent);

        let d = DiscriminatorSet {
            sepsis: SepsisFlags { suspected_infection: true, ..Default::default() },
            ..d
        };
        let r = classify(&adult(), &v, &d);
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert!(r.discriminators[0].contains("2 SIRS criteria"));
    }

    #[test]
    fn test_immunosuppressed_fever() {
        let d = DiscriminatorSet {
            sepsis: SepsisFlags { immunosuppressed: true, ..Default::default() },
            ..Default::default()
        };
        let afebrile = VitalSigns { temperature: Some(38.0), ..Default::default() };
        assert_eq!(classify(&adult(), &afebrile, &d).level, SeverityLevel::NonUrgent);
        let febrile = VitalSigns { temperature: Some(38.1), ..Default::default() };
        assert_eq!(classify(&adult(), &febrile, &d).level, SeverityLevel::Emergent);
    }

    #[test]
    fn test_pain_seven_needs_vital_alert() {
        let calm = VitalSigns { pain: Some(7), heart_rate: Some(80.0), ..Default::default() };
        assert_eq!(classify(&adult(), &calm, &resources(ResourceNeed::One)).level, SeverityLevel::LessUrgent);

        let tachy = VitalSigns { pain: Some(7), heart_rate: Some(135.0), ..Default::default() };
        let r = classify(&adult(), &tachy, &resources(ResourceNeed::One));
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert!(r.discriminators.iter().any(|d| d == "Pain 7/10 with abnormal vital signs"));
    }

    #[test]
    fn test_pain_eight_fires_alone() {
        let v = VitalSigns { pain: Some(8), ..Default::default() };
        let r = classify(&adult(), &v, &resources(ResourceNeed::None));
        assert_eq!(r.level, SeverityLevel::Emergent);
        assert_eq!(r.discriminators, vec!["Severe pain 8/10".to_string()]);
    }

    #[test]
    fn test_glasgow_below_normal_fires() {
        let v = VitalSigns { glasgow: 14, ..Default::default() };
        let r = classify(&adult(), &v, &DiscriminatorSet::default());
        assert_eq!(r.level, SeverityLevel::Emergent);
    }

    #[test]
    fn test_justification_order() {
        let v = VitalSigns { systolic_bp: Some(85.0), ..Default::default() };
        let d = DiscriminatorSet {
            resources: ResourceNeed::TwoOrMore,
            cardiac: CardiacFlags { high_risk_chest_pain: true, ..Default::default() },
            ..Default::default()
        };
        let r = classify(&adult(), &v, &d);
        assert_eq!(r.justification.len(), 4);
        assert!(r.justification[0].starts_with("Expected two or more resources"));
        assert!(r.justification[1].starts_with("Escalated from level 3"));
        assert_eq!(r.justification[2], "Systolic BP 85 mmHg below 90");
        assert_eq!(r.justification[3], "High-risk chest pain");
        assert_eq!(r.discriminators, r.justification[2..].to_vec());
    }

    #[test]
    fn test_empty_input_is_level_five() {
        let r = classify(&PatientContext::default(), &VitalSigns::default(), &DiscriminatorSet::default());
        assert_eq!(r.level, SeverityLevel::NonUrgent);
        assert_eq!(r.title, "Non-urgent");
    }
}
