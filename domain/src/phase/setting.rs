//! Phase settings
//!
//! Immutable for the duration of one phase. Sent verbatim to every agent in
//! the phase-start packet.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message count limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxCount {
    /// Messages each agent may have accepted in one phase
    pub per_agent: usize,
    /// Messages accepted across all agents in one phase (0 = unlimited)
    pub per_day: usize,
}

impl Default for MaxCount {
    fn default() -> Self {
        Self {
            per_agent: 5,
            per_day: 20,
        }
    }
}

/// Message length limits, counted in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxLength {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_talk: Option<usize>,
}

impl MaxLength {
    pub fn per_talk(chars: usize) -> Self {
        Self {
            per_talk: Some(chars),
        }
    }

    /// Effective per-message limit; unset and 0 both mean unlimited.
    pub fn limit(&self) -> Option<usize> {
        self.per_talk.filter(|n| *n > 0)
    }
}

/// Quota settings for one stream (talk or whisper).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkSetting {
    pub max_count: MaxCount,
    #[serde(default)]
    pub max_length: MaxLength,
}

/// Timing settings shared by talk and whisper phases.
///
/// A zero timeout is a configuration defect; the coordinator substitutes
/// the documented default for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeSetting {
    #[serde(with = "crate::core::duration")]
    pub phase_timeout: Duration,
    #[serde(with = "crate::core::duration")]
    pub silence_timeout: Duration,
    /// Minimum interval between two accepted messages of one agent (0 = off)
    #[serde(with = "crate::core::duration")]
    pub rate_limit: Duration,
}

impl RealtimeSetting {
    pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(120);
    pub const DEFAULT_SILENCE_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for RealtimeSetting {
    fn default() -> Self {
        Self {
            phase_timeout: Self::DEFAULT_PHASE_TIMEOUT,
            silence_timeout: Self::DEFAULT_SILENCE_TIMEOUT,
            rate_limit: Duration::ZERO,
        }
    }
}

/// Everything that parameterizes one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSettings {
    #[serde(flatten)]
    pub talk: TalkSetting,
    #[serde(flatten)]
    pub realtime: RealtimeSetting,
}

impl PhaseSettings {
    pub fn new(talk: TalkSetting, realtime: RealtimeSetting) -> Self {
        Self { talk, realtime }
    }
}
