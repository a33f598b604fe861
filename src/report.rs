//! Triage report: the three evaluators composed over one snapshot
//!
//! The evaluators never see each other's output. Everything here is
//! presentation: protocol notes are appended to a copy of the severity
//! justification, and the deterioration breakdown can be left out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ReportConfig, TriageConfig};
use crate::engine;
use crate::intake::EvaluationInputs;
use crate::types::{DeteriorationResult, ProtocolAlert, SeverityResult};

/// Report composition switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Facility name for the report header
    pub facility: String,
    pub append_protocol_notes: bool,
    pub include_breakdown: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&TriageConfig::default())
    }
}

impl ReportOptions {
    pub fn from_config(config: &TriageConfig) -> Self {
        let ReportConfig { append_protocol_notes, include_breakdown } = config.report;
        Self {
            facility: config.facility.name.clone(),
            append_protocol_notes,
            include_breakdown,
        }
    }
}

/// Complete evaluation of one patient snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageReport {
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub evaluated_at: DateTime<Utc>,
    pub severity: SeverityResult,
    pub deterioration: DeteriorationResult,
    pub protocols: Vec<ProtocolAlert>,
}

impl TriageReport {
    /// True when any output calls for immediate action.
    pub fn requires_immediate_attention(&self) -> bool {
        self.severity.level.number() <= 2
            || self.deterioration.reassessment.activates_rapid_response()
            || !self.protocols.is_empty()
    }
}

/// Run all three evaluators on the same inputs and compose the report.
pub fn assess(inputs: &EvaluationInputs, options: &ReportOptions) -> TriageReport {
    let mut severity =
        engine::classify(&inputs.patient, &inputs.vitals, &inputs.discriminators);
    let mut deterioration = engine::score(&inputs.vitals);
    let protocols = engine::evaluate(&inputs.vitals, &inputs.symptoms);

    if options.append_protocol_notes {
        severity
            .justification
            .extend(protocols.iter().map(ToString::to_string));
    }
    if !options.include_breakdown {
        deterioration.contributions.clear();
    }

    TriageReport {
        facility: options.facility.clone(),
        patient_id: inputs.patient_id.clone(),
        evaluated_at: Utc::now(),
        severity,
        deterioration,
        protocols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Symptom, SeverityLevel, SymptomSet, VitalSigns};

    fn stroke_inputs() -> EvaluationInputs {
        EvaluationInputs {
            symptoms: [Symptom::FacialDroop].into_iter().collect::<SymptomSet>(),
            vitals: VitalSigns {
                systolic_bp: Some(130.0),
                heart_rate: Some(80.0),
                resp_rate: Some(16.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_protocol_notes_appended_to_justification() {
        let inputs = stroke_inputs();
        let report = assess(&inputs, &ReportOptions::default());
        let last = report.severity.justification.last().unwrap();
        assert!(last.starts_with("Protocol activated: Stroke"), "got {last}");

        // The evaluator's own output is unchanged
        let plain = engine::classify(&inputs.patient, &inputs.vitals, &inputs.discriminators);
        assert_eq!(report.severity.level, plain.level);
        assert_eq!(report.severity.justification.len(), plain.justification.len() + 1);
    }

    #[test]
    fn test_notes_can_be_disabled() {
        let options = ReportOptions { append_protocol_notes: false, ..Default::default() };
        let report = assess(&stroke_inputs(), &options);
        assert!(report
            .severity
            .justification
            .iter()
            .all(|line| !line.starts_with("Protocol activated")));
        assert_eq!(report.protocols.len(), 1);
    }

    #[test]
    fn test_breakdown_can_be_omitted() {
        let options = ReportOptions { include_breakdown: false, ..Default::default() };
        let report = assess(&stroke_inputs(), &options);
        assert!(report.deterioration.contributions.is_empty());
        assert_eq!(report.deterioration.score, engine::score(&stroke_inputs().vitals).score);
    }

    #[test]
    fn test_quiet_patient_needs_no_immediate_attention() {
        let inputs = EvaluationInputs {
            vitals: VitalSigns {
                systolic_bp: Some(120.0),
                heart_rate: Some(100.0),
                resp_rate: Some(16.0),
                temperature: Some(37.0),
                spo2: Some(98.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = assess(&inputs, &ReportOptions::default());
        assert_eq!(report.severity.level, SeverityLevel::NonUrgent);
        assert!(!report.requires_immediate_attention());
    }
}
