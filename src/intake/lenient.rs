//! Lenient field deserializers for upstream form data.
//!
//! Form fields reach the engine as JSON numbers, numeric strings, empty
//! strings, `null` or outright garbage. A field that cannot be read is
//! dropped (treated as absent) instead of rejecting the whole snapshot.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::types::{Consciousness, GLASGOW_NORMAL};

/// Any JSON value a form field might hold.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Null(()),
    Bool(bool),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Parse a numeric reading from form text.
///
/// Accepts surrounding whitespace and a single decimal comma (`"36,5"`).
/// Empty, non-numeric and non-finite text yields `None`.
pub fn parse_reading(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!(raw = %raw, "Discarding unparseable numeric reading");
            None
        }
    }
}

fn field_to_number(field: RawField) -> Option<f64> {
    match field {
        RawField::Number(v) if v.is_finite() => Some(v),
        RawField::Text(s) => parse_reading(&s),
        RawField::Null(()) | RawField::Number(_) => None,
        RawField::Bool(_) | RawField::Other(_) => {
            debug!("Discarding non-numeric value in numeric field");
            None
        }
    }
}

/// Parse a pain score: an integer 0-10, anything else is absent.
pub fn parse_pain(value: f64) -> Option<u8> {
    if value.fract() == 0.0 && (0.0..=10.0).contains(&value) {
        Some(value as u8)
    } else {
        debug!(value, "Discarding out-of-range pain level");
        None
    }
}

/// Parse a Glasgow score: an integer 3-15, anything else is the normal 15.
pub fn parse_glasgow(value: f64) -> u8 {
    if value.fract() == 0.0 && (3.0..=15.0).contains(&value) {
        value as u8
    } else {
        debug!(value, "Discarding out-of-range Glasgow score");
        GLASGOW_NORMAL
    }
}

/// Parse a yes/no form flag.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "sim" | "s" | "1" | "on"
    )
}

/// Drop a zero reading. Forms fill empty vital-sign fields with 0, and no
/// living patient has a zero pressure, rate or temperature.
fn nonzero(value: f64) -> Option<f64> {
    if value == 0.0 {
        debug!("Treating zero reading as not recorded");
        None
    } else {
        Some(value)
    }
}

/// Vital-sign reading where zero means "not recorded".
pub fn reading<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(field_to_number(RawField::deserialize(deserializer)?).and_then(nonzero))
}

/// Oxygen saturation. Unlike other readings an explicit zero is kept: it is
/// a critical value, not an empty field.
pub fn saturation<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(field_to_number(RawField::deserialize(deserializer)?))
}

pub fn pain_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(field_to_number(RawField::deserialize(deserializer)?).and_then(parse_pain))
}

pub fn glasgow<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(field_to_number(RawField::deserialize(deserializer)?)
        .map_or(GLASGOW_NORMAL, parse_glasgow))
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawField::deserialize(deserializer)? {
        RawField::Bool(b) => b,
        RawField::Number(v) => v == 1.0,
        RawField::Text(s) => parse_flag(&s),
        RawField::Null(()) | RawField::Other(_) => false,
    })
}

/// Consciousness level; absent or unrecognised text reads as Alert.
pub fn consciousness<'de, D>(deserializer: D) -> Result<Consciousness, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawField::deserialize(deserializer)? {
        RawField::Text(s) => Consciousness::parse(&s).unwrap_or_else(|| {
            debug!(raw = %s, "Unrecognised consciousness level, assuming Alert");
            Consciousness::Alert
        }),
        _ => Consciousness::Alert,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reading_plain_and_comma() {
        assert_eq!(parse_reading("120"), Some(120.0));
        assert_eq!(parse_reading(" 36.5 "), Some(36.5));
        assert_eq!(parse_reading("36,5"), Some(36.5));
    }

    #[test]
    fn test_parse_reading_rejects_garbage() {
        assert_eq!(parse_reading(""), None);
        assert_eq!(parse_reading("   "), None);
        assert_eq!(parse_reading("abc"), None);
        assert_eq!(parse_reading("12/80"), None);
        assert_eq!(parse_reading("NaN"), None);
        assert_eq!(parse_reading("inf"), None);
    }

    #[test]
    fn test_zero_is_a_real_reading() {
        assert_eq!(parse_reading("0"), Some(0.0));
    }

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "reading")]
        heart_rate: Option<f64>,
        #[serde(default, deserialize_with = "saturation")]
        spo2: Option<f64>,
    }

    fn fields(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_zero_vital_reading_is_absent() {
        assert_eq!(fields(r#"{"heart_rate": 0}"#).heart_rate, None);
        assert_eq!(fields(r#"{"heart_rate": "0"}"#).heart_rate, None);
        assert_eq!(fields(r#"{"heart_rate": "0,0"}"#).heart_rate, None);
        assert_eq!(fields(r#"{"heart_rate": 72}"#).heart_rate, Some(72.0));
    }

    #[test]
    fn test_zero_saturation_is_kept() {
        assert_eq!(fields(r#"{"spo2": 0}"#).spo2, Some(0.0));
        assert_eq!(fields(r#"{"spo2": "0"}"#).spo2, Some(0.0));
        assert_eq!(fields(r#"{"spo2": ""}"#).spo2, None);
    }

    #[test]
    fn test_pain_bounds() {
        assert_eq!(parse_pain(0.0), Some(0));
        assert_eq!(parse_pain(10.0), Some(10));
        assert_eq!(parse_pain(11.0), None);
        assert_eq!(parse_pain(-1.0), None);
        assert_eq!(parse_pain(7.5), None);
    }

    #[test]
    fn test_glasgow_defaults_to_normal() {
        assert_eq!(parse_glasgow(9.0), 9);
        assert_eq!(parse_glasgow(2.0), 15);
        assert_eq!(parse_glasgow(16.0), 15);
    }

    #[test]
    fn test_flag_words() {
        assert!(parse_flag("true"));
        assert!(parse_flag("Sim"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }
}
