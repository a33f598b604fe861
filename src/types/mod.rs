//! Shared data structures for the triage engine
//!
//! This module defines the inputs and outputs of the three evaluators:
//! - Inputs: VitalSigns, PatientContext, DiscriminatorSet, SymptomSet
//! - Severity classifier output: SeverityResult
//! - Deterioration scorer output: DeteriorationResult
//! - Protocol trigger output: ProtocolAlert

mod vitals;
mod patient;
mod discriminators;
mod symptoms;
mod severity;
mod early_warning;
mod protocol;
pub mod thresholds;

pub use vitals::*;
pub use patient::*;
pub use discriminators::*;
pub use symptoms::*;
pub use severity::*;
pub use early_warning::*;
pub use protocol::*;
