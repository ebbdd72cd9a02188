//! Session configuration: what a multi-day session runs.
//!
//! [`SessionConfig`] groups the static parameters that control
//! [`RunSessionUseCase`](crate::use_cases::run_session::RunSessionUseCase):
//! how many days to play, the quota settings of each stream, the shared
//! timing settings, and which seats form the whisper group.

use realtalk_domain::{ParticipantId, PhaseKind, PhaseSettings, RealtimeSetting, TalkSetting};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of days to play.
    pub days: u32,
    /// Quotas for public talk phases.
    pub talk: TalkSetting,
    /// Quotas for whisper phases.
    pub whisper: TalkSetting,
    /// Timeouts and rate limit, shared by both streams.
    pub realtime: RealtimeSetting,
    /// Seats taking part in whisper phases. Empty disables whispering.
    pub whisper_group: Vec<ParticipantId>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            days: 1,
            talk: TalkSetting::default(),
            whisper: TalkSetting::default(),
            realtime: RealtimeSetting::default(),
            whisper_group: Vec::new(),
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_talk(mut self, talk: TalkSetting) -> Self {
        self.talk = talk;
        self
    }

    pub fn with_whisper(mut self, whisper: TalkSetting) -> Self {
        self.whisper = whisper;
        self
    }

    pub fn with_realtime(mut self, realtime: RealtimeSetting) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_whisper_group(mut self, group: Vec<ParticipantId>) -> Self {
        self.whisper_group = group;
        self
    }

    /// Settings for one phase of the given stream.
    pub fn phase_settings(&self, kind: PhaseKind) -> PhaseSettings {
        let talk = match kind {
            PhaseKind::Talk => self.talk,
            PhaseKind::Whisper => self.whisper,
        };
        PhaseSettings::new(talk, self.realtime)
    }
}
