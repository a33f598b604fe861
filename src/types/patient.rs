//! Patient demographics: PatientContext, Age, AgeUnit

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::thresholds::{pediatric_band, PediatricBand, PEDIATRIC_AGE_LIMIT_MONTHS};

/// Patients younger than this are aged in months rather than years.
const AGE_IN_MONTHS_BELOW: u32 = 24;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    Months,
    Years,
}

/// Age as a magnitude plus unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Age {
    pub value: u32,
    pub unit: AgeUnit,
}

impl Age {
    pub fn years(value: u32) -> Self {
        Self { value, unit: AgeUnit::Years }
    }

    pub fn months(value: u32) -> Self {
        Self { value, unit: AgeUnit::Months }
    }

    pub fn in_months(&self) -> u32 {
        match self.unit {
            AgeUnit::Months => self.value,
            AgeUnit::Years => self.value.saturating_mul(12),
        }
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            AgeUnit::Months => write!(f, "{} months", self.value),
            AgeUnit::Years => write!(f, "{} years", self.value),
        }
    }
}

/// Demographic context for one evaluation.
///
/// Age is fixed when the context is built and never changes afterwards. A
/// context without an age is evaluated against adult thresholds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientContext {
    #[serde(default)]
    pub age: Option<Age>,
}

impl PatientContext {
    pub fn new(age: Age) -> Self {
        Self { age: Some(age) }
    }

    /// Derive the age on `on` from a birth date: completed months under two
    /// years old, completed years from then on. `None` if the birth date is
    /// after `on`.
    pub fn from_birth_date(birth: NaiveDate, on: NaiveDate) -> Option<Self> {
        if birth > on {
            return None;
        }
        let mut months = (on.year() - birth.year()) * 12 + on.month() as i32 - birth.month() as i32;
        if on.day() < birth.day() {
            months -= 1;
        }
        let months = u32::try_from(months.max(0)).ok()?;
        let age = if months < AGE_IN_MONTHS_BELOW {
            Age::months(months)
        } else {
            Age::years(months / 12)
        };
        Some(Self::new(age))
    }

    pub fn age_in_months(&self) -> Option<u32> {
        self.age.map(|a| a.in_months())
    }

    /// Under 18 years old.
    pub fn is_pediatric(&self) -> bool {
        self.age_in_months()
            .is_some_and(|m| m < PEDIATRIC_AGE_LIMIT_MONTHS)
    }

    /// Pediatric vital-sign band, if the patient is a child.
    pub fn pediatric_band(&self) -> Option<&'static PediatricBand> {
        match self.age_in_months() {
            Some(m) if m < PEDIATRIC_AGE_LIMIT_MONTHS => Some(pediatric_band(m)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_in_months() {
        assert_eq!(Age::years(8).in_months(), 96);
        assert_eq!(Age::months(8).in_months(), 8);
    }

    #[test]
    fn test_pediatric_cutoff_at_18_years() {
        assert!(PatientContext::new(Age::years(17)).is_pediatric());
        assert!(!PatientContext::new(Age::years(18)).is_pediatric());
        assert!(PatientContext::new(Age::months(215)).is_pediatric());
        assert!(!PatientContext::default().is_pediatric());
    }

    #[test]
    fn test_birth_date_under_two_years_uses_months() {
        let ctx = PatientContext::from_birth_date(date(2025, 3, 20), date(2026, 3, 19)).unwrap();
        assert_eq!(ctx.age, Some(Age::months(11)));
    }

    #[test]
    fn test_birth_date_counts_completed_years() {
        let ctx = PatientContext::from_birth_date(date(2018, 6, 15), date(2026, 6, 14)).unwrap();
        assert_eq!(ctx.age, Some(Age::years(7)));
        let ctx = PatientContext::from_birth_date(date(2018, 6, 15), date(2026, 6, 15)).unwrap();
        assert_eq!(ctx.age, Some(Age::years(8)));
    }

    #[test]
    fn test_birth_date_in_future_is_rejected() {
        assert!(PatientContext::from_birth_date(date(2027, 1, 1), date(2026, 1, 1)).is_none());
    }

    #[test]
    fn test_newborn_is_zero_months() {
        let ctx = PatientContext::from_birth_date(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        assert_eq!(ctx.age, Some(Age::months(0)));
        assert_eq!(ctx.pediatric_band().map(|b| b.label), Some("0-1y"));
    }
}
