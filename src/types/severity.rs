//! Severity classifier output: SeverityLevel, SeverityResult

use serde::{Deserialize, Serialize};

/// Five-level emergency severity, 1 being the most urgent.
///
/// Variants are ordered by urgency, so `a < b` means `a` is more urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Resuscitation = 1,
    Emergent = 2,
    Urgent = 3,
    LessUrgent = 4,
    NonUrgent = 5,
}

impl SeverityLevel {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SeverityLevel::Resuscitation),
            2 => Some(SeverityLevel::Emergent),
            3 => Some(SeverityLevel::Urgent),
            4 => Some(SeverityLevel::LessUrgent),
            5 => Some(SeverityLevel::NonUrgent),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SeverityLevel::Resuscitation => "Resuscitation",
            SeverityLevel::Emergent => "Emergent",
            SeverityLevel::Urgent => "Urgent",
            SeverityLevel::LessUrgent => "Less urgent",
            SeverityLevel::NonUrgent => "Non-urgent",
        }
    }

    /// Target time to first clinician contact (minutes).
    pub fn target_wait_minutes(self) -> u32 {
        match self {
            SeverityLevel::Resuscitation => 0,
            SeverityLevel::Emergent => 10,
            SeverityLevel::Urgent => 30,
            SeverityLevel::LessUrgent => 60,
            SeverityLevel::NonUrgent => 120,
        }
    }

    pub fn target_wait(self) -> String {
        match self.target_wait_minutes() {
            0 => "Immediate".to_string(),
            m => format!("Up to {m} min"),
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            SeverityLevel::Resuscitation => "red",
            SeverityLevel::Emergent => "orange",
            SeverityLevel::Urgent => "yellow",
            SeverityLevel::LessUrgent => "green",
            SeverityLevel::NonUrgent => "blue",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} ({})", self.number(), self.title())
    }
}

/// Result of one severity classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityResult {
    pub level: SeverityLevel,
    pub title: String,
    pub target_wait: String,
    /// Human-readable reasoning in evaluation order
    pub justification: Vec<String>,
    /// Labels of every discriminator that fired
    pub discriminators: Vec<String>,
}

impl SeverityResult {
    pub fn new(level: SeverityLevel, justification: Vec<String>, discriminators: Vec<String>) -> Self {
        Self {
            level,
            title: level.title().to_string(),
            target_wait: level.target_wait(),
            justification,
            discriminators,
        }
    }
}
