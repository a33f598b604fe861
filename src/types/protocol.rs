//! Protocol trigger output: ProtocolKind, ProtocolAlert

use serde::{Deserialize, Serialize};

/// Critical-care protocols the trigger evaluator can activate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    Stroke,
    ChestPain,
    Sepsis,
    Pain,
}

impl std::fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolKind::Stroke => write!(f, "Stroke"),
            ProtocolKind::ChestPain => write!(f, "Chest pain"),
            ProtocolKind::Sepsis => write!(f, "Sepsis"),
            ProtocolKind::Pain => write!(f, "Severe pain"),
        }
    }
}

/// One activated protocol and the findings that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolAlert {
    pub protocol: ProtocolKind,
    pub reasons: Vec<String>,
}

impl ProtocolAlert {
    pub fn new(protocol: ProtocolKind, reasons: Vec<String>) -> Self {
        Self { protocol, reasons }
    }
}

impl std::fmt::Display for ProtocolAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Protocol activated: {} ({})", self.protocol, self.reasons.join("; "))
    }
}
