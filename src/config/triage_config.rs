//! Triage Configuration - application settings as TOML values
//!
//! Everything here shapes the shell around the engine (intake strictness,
//! report composition, output format). No field reaches a clinical
//! threshold: the same snapshot classifies identically under any config.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, DEFAULT_FACILITY_NAME, LOCAL_CONFIG_FILE};
use super::validation::ValidationWarning;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a triage deployment.
///
/// Load with `TriageConfig::load()` which searches:
/// 1. `$TRIAGE_CONFIG` env var
/// 2. `./triage_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageConfig {
    /// Facility identification
    #[serde(default)]
    pub facility: FacilityConfig,

    /// Upstream request handling
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Report composition
    #[serde(default)]
    pub report: ReportConfig,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

impl TriageConfig {
    /// Load configuration using the standard search order:
    /// 1. `$TRIAGE_CONFIG` environment variable
    /// 2. `./triage_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), facility = %config.facility.name, "Loaded triage config from TRIAGE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from TRIAGE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "TRIAGE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./triage_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(facility = %config.facility.name, "Loaded triage config from ./triage_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./triage_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No triage_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path, logging any warnings.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, warnings) = Self::load_with_warnings(path)?;
        for w in &warnings {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Load from a TOML file and hand back the warnings instead of logging
    /// them: unknown keys first, then suspicious values.
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: unknown keys first (warnings only), then typed parse
        let mut warnings = super::validation::validate_unknown_keys(&contents);

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        warnings.extend(config.check()?);
        Ok((config, warnings))
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Triage config saved");
        Ok(())
    }

    /// Validate settings for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for w in self.check()? {
            warn!("{}", w);
        }
        Ok(())
    }

    /// Range validation without logging.
    fn check(&self) -> Result<Vec<ValidationWarning>, ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacilityConfig {
    /// Name printed in report headers
    #[serde(default = "default_facility_name")]
    pub name: String,

    /// Local UTC offset (minutes), used to decide "today" when ages are
    /// derived from birth dates
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

fn default_facility_name() -> String {
    DEFAULT_FACILITY_NAME.to_string()
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            name: default_facility_name(),
            timezone_offset_minutes: 0,
        }
    }
}

impl FacilityConfig {
    /// Today's date at the facility.
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        match self.timezone_offset_minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Reject requests naming an unknown symptom (otherwise drop it with a warning)
    #[serde(default = "default_true")]
    pub strict_symptoms: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self { strict_symptoms: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    /// Append protocol alerts to the severity justification as free text
    #[serde(default = "default_true")]
    pub append_protocol_notes: bool,

    /// Include per-parameter deterioration points in the report
    #[serde(default = "default_true")]
    pub include_breakdown: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            append_protocol_notes: true,
            include_breakdown: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: TriageConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, TriageConfig::default());
        assert_eq!(config.facility.name, "Emergency Department");
        assert!(config.intake.strict_symptoms);
        assert!(config.report.append_protocol_notes);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[facility]
name = "St. Elsewhere ED"

[report]
append_protocol_notes = false
"#;
        let config: TriageConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.facility.name, "St. Elsewhere ED");
        assert!(!config.report.append_protocol_notes);
        // Non-overridden values retain defaults
        assert!(config.report.include_breakdown);
        assert_eq!(config.facility.timezone_offset_minutes, 0);
    }

    #[test]
    fn test_validation_catches_empty_facility_name() {
        let mut config = TriageConfig::default();
        config.facility.name = "   ".to_string();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Validation(ref e)) if e.iter().any(|m| m.contains("facility.name"))));
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut original = TriageConfig::default();
        original.facility.timezone_offset_minutes = -180;
        original.output.pretty = true;
        let toml_str = original.to_toml().expect("serialization should work");
        let roundtripped: TriageConfig = toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn test_today_with_offset_is_within_a_day_of_utc() {
        let facility = FacilityConfig { timezone_offset_minutes: -180, ..Default::default() };
        let diff = (facility.today() - Utc::now().date_naive()).num_days().abs();
        assert!(diff <= 1);
    }

    #[test]
    fn test_extreme_offset_falls_back_to_utc_date() {
        for minutes in [i32::MIN, i32::MAX, 15 * 60] {
            let facility = FacilityConfig { timezone_offset_minutes: minutes, ..Default::default() };
            let diff = (facility.today() - Utc::now().date_naive()).num_days().abs();
            assert!(diff <= 1, "offset {minutes}");
        }
    }

    #[test]
    fn test_extreme_offset_fails_validation() {
        let mut config = TriageConfig::default();
        config.facility.timezone_offset_minutes = i32::MIN;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
