//! Upstream boundary: raw evaluation requests → typed engine inputs
//!
//! A request is the JSON snapshot a data-entry form submits. Numeric fields
//! are read leniently (see [`lenient`]). Symptom identifiers and birth dates
//! are checked strictly.

pub mod lenient;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::types::{
    Age, DiscriminatorSet, PatientContext, Symptom, SymptomParseError, SymptomSet, VitalSigns,
};

/// Birth-date layouts accepted from forms.
const BIRTH_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Malformed request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownSymptom(#[from] SymptomParseError),

    #[error("Unreadable birth date '{0}'")]
    InvalidBirthDate(String),

    #[error("Birth date {birth} is after the evaluation date {on}")]
    BirthDateInFuture { birth: NaiveDate, on: NaiveDate },
}

/// How a request is turned into engine inputs.
#[derive(Debug, Clone, Copy)]
pub struct IntakeOptions {
    /// Reject unknown symptom identifiers instead of dropping them
    pub strict_symptoms: bool,
    /// Evaluation date used for birth-date ages
    pub today: NaiveDate,
}

/// One evaluation request as submitted upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationRequest {
    /// Opaque identifier echoed back in the report
    pub patient_id: Option<String>,
    /// Explicit age; takes precedence over `birth_date`
    pub age: Option<Age>,
    /// `YYYY-MM-DD` or `DD/MM/YYYY`
    pub birth_date: Option<String>,
    pub vitals: VitalSigns,
    pub discriminators: DiscriminatorSet,
    /// Symptom identifiers (see `Symptom::id`)
    pub symptoms: Vec<String>,
}

/// Typed snapshot shared by all three evaluators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationInputs {
    pub patient_id: Option<String>,
    pub patient: PatientContext,
    pub vitals: VitalSigns,
    pub discriminators: DiscriminatorSet,
    pub symptoms: SymptomSet,
}

impl EvaluationRequest {
    /// Resolve the request into engine inputs. Age is fixed here, once.
    pub fn into_inputs(self, options: &IntakeOptions) -> Result<EvaluationInputs, IntakeError> {
        let patient = resolve_patient(self.age, self.birth_date.as_deref(), options.today)?;
        if patient.age.is_none() {
            warn!(patient_id = ?self.patient_id, "No age in request, evaluating with adult thresholds");
        }
        let symptoms = parse_symptoms(&self.symptoms, options.strict_symptoms)?;
        Ok(EvaluationInputs {
            patient_id: self.patient_id,
            patient,
            vitals: self.vitals,
            discriminators: self.discriminators,
            symptoms,
        })
    }
}

/// Parse a request body holding either one request object or an array of them.
pub fn parse_requests(json: &str) -> Result<Vec<EvaluationRequest>, IntakeError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Body {
        Many(Vec<EvaluationRequest>),
        One(Box<EvaluationRequest>),
    }

    // Validate syntax first so malformed JSON reports a line and column
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(match serde_json::from_value(value)? {
        Body::Many(requests) => requests,
        Body::One(request) => vec![*request],
    })
}

fn parse_birth_date(raw: &str) -> Result<NaiveDate, IntakeError> {
    let trimmed = raw.trim();
    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| IntakeError::InvalidBirthDate(raw.to_string()))
}

fn resolve_patient(
    age: Option<Age>,
    birth_date: Option<&str>,
    today: NaiveDate,
) -> Result<PatientContext, IntakeError> {
    if let Some(age) = age {
        return Ok(PatientContext::new(age));
    }
    match birth_date.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let birth = parse_birth_date(raw)?;
            PatientContext::from_birth_date(birth, today)
                .ok_or(IntakeError::BirthDateInFuture { birth, on: today })
        }
        None => Ok(PatientContext::default()),
    }
}

/// Parse symptom identifiers. In lenient mode unknown identifiers are
/// dropped with a warning instead of failing the request.
pub fn parse_symptoms(ids: &[String], strict: bool) -> Result<SymptomSet, IntakeError> {
    let mut set = SymptomSet::new();
    for id in ids {
        match id.parse::<Symptom>() {
            Ok(symptom) => {
                set.insert(symptom);
            }
            Err(e) if strict => return Err(e.into()),
            Err(e) => warn!(error = %e, "Dropping unknown symptom identifier"),
        }
    }
    Ok(set)
}
