//! Clinical risk-classification engine
//!
//! Three independent, pure evaluators over the same snapshot:
//!
//! 1. **Severity** - five-level emergency severity with discriminator escalation
//! 2. **Deterioration** - additive early-warning score, risk band, reassessment
//! 3. **Protocols** - stroke, chest pain, sepsis and severe pain triggers
//!
//! None of them reads another's output, holds state between calls, or fails.

pub mod severity;
pub mod deterioration;
pub mod protocols;

pub use deterioration::score;
pub use protocols::evaluate;
pub use severity::classify;
