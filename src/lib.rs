//! Triage Engine: Emergency Clinical Risk Classification
//!
//! Pure evaluators over a single patient snapshot, plus the thin shell
//! (intake, config, report) that feeds them.
//!
//! ## Architecture
//!
//! - **Severity Classifier**: five-level emergency severity with discriminator escalation
//! - **Deterioration Scorer**: additive early-warning score, risk band and reassessment interval
//! - **Protocol Triggers**: stroke, chest pain, sepsis and severe pain activation
//! - **Intake**: lenient parsing of upstream form data into typed inputs
//! - **Report**: composition of the three outputs for display

pub mod config;
pub mod types;
pub mod engine;
pub mod intake;
pub mod report;

// Re-export configuration
pub use config::{ConfigError, TriageConfig};

// Re-export evaluators
pub use engine::{classify, evaluate, score};

// Re-export commonly used types
pub use types::{
    Age, AgeUnit, Consciousness, DeteriorationResult, DiscriminatorSet, PatientContext,
    ProtocolAlert, ProtocolKind, Reassessment, ResourceNeed, RiskBand, SeverityLevel,
    SeverityResult, Symptom, SymptomGroup, SymptomSet, VitalSigns,
};

// Re-export intake and report
pub use intake::{EvaluationInputs, EvaluationRequest, IntakeError, IntakeOptions};
pub use report::{assess, ReportOptions, TriageReport};
