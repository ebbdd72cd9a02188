//! Talk domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which stream a phase speaks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    /// Public talk among all living agents
    Talk,
    /// Restricted whisper among the whisper group
    Whisper,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Talk => "talk",
            PhaseKind::Whisper => "whisper",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PhaseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "talk" => Ok(PhaseKind::Talk),
            "whisper" => Ok(PhaseKind::Whisper),
            _ => Err(DomainError::UnknownPhaseKind(s.to_string())),
        }
    }
}

/// One accepted utterance.
///
/// Real-time phases have no discrete turns, so `turn` is always 0 for
/// entries they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub idx: usize,
    pub day: u32,
    pub turn: u32,
    pub agent: String,
    pub text: String,
}
