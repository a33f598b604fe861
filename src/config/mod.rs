//! Triage Configuration Module
//!
//! Deployment settings loaded from TOML files: facility identity, intake
//! strictness, report composition and output format.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `TRIAGE_CONFIG` environment variable (path to TOML file)
//! 3. `triage_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! Clinical thresholds are compile-time constants in `types::thresholds` and
//! are not part of this configuration.

mod triage_config;
pub mod defaults;
pub mod validation;

pub use triage_config::*;
