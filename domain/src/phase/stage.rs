//! Phase lifecycle vocabulary

use serde::{Deserialize, Serialize};

/// Coordinator stages. Transitions are linear; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhaseStage {
    Starting,
    Active,
    Ending,
    Draining,
    Done,
}

impl PhaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseStage::Starting => "starting",
            PhaseStage::Active => "active",
            PhaseStage::Ending => "ending",
            PhaseStage::Draining => "draining",
            PhaseStage::Done => "done",
        }
    }
}

impl std::fmt::Display for PhaseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a phase stopped accepting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Fewer than two eligible participants; the phase never started
    InsufficientParticipants,
    /// Every eligible participant sent OVER
    AllOver,
    /// The phase-wide message quota was reached
    DailyQuotaReached,
    /// The absolute phase deadline fired
    PhaseTimeout,
    /// Nobody had a message accepted for the silence interval
    SilenceTimeout,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::InsufficientParticipants => "insufficient_participants",
            EndReason::AllOver => "all_over",
            EndReason::DailyQuotaReached => "daily_quota_reached",
            EndReason::PhaseTimeout => "phase_timeout",
            EndReason::SilenceTimeout => "silence_timeout",
        }
    }

    /// Whether the phase actually ran (start packets were sent).
    pub fn ran(&self) -> bool {
        !matches!(self, EndReason::InsufficientParticipants)
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(PhaseStage::Starting < PhaseStage::Active);
        assert!(PhaseStage::Ending < PhaseStage::Draining);
        assert!(PhaseStage::Draining < PhaseStage::Done);
    }

    #[test]
    fn test_end_reason_ran() {
        assert!(!EndReason::InsufficientParticipants.ran());
        assert!(EndReason::SilenceTimeout.ran());
        assert_eq!(EndReason::AllOver.to_string(), "all_over");
    }
}
