//! Configuration defaults and search-path constants.
//!
//! Clinical thresholds are not here: they live in
//! `types::thresholds` and cannot be configured.

// ============================================================================
// Search Order
// ============================================================================

/// Environment variable naming a config file path.
pub const CONFIG_ENV_VAR: &str = "TRIAGE_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "triage_config.toml";

// ============================================================================
// Facility
// ============================================================================

/// Facility name shown in report headers when none is configured.
pub const DEFAULT_FACILITY_NAME: &str = "Emergency Department";

/// Largest UTC offset in use anywhere (minutes). 840 = UTC+14.
pub const MAX_TIMEZONE_OFFSET_MINUTES: i32 = 14 * 60;
