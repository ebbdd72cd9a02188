//! Agent-facing packets
//!
//! Real-time phases use three notifications per stream:
//!
//! | Request | Carries |
//! |---------|---------|
//! | `TALK_START` / `WHISPER_START` | info, settings, full history so far |
//! | `TALK_BROADCAST` / `WHISPER_BROADCAST` | info, the single new entry |
//! | `TALK_END` / `WHISPER_END` | nothing |
//!
//! `info.remain_count` is personalized for each recipient.

use crate::phase::PhaseSettings;
use crate::talk::{PhaseKind, Talk};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    TalkStart,
    TalkBroadcast,
    TalkEnd,
    WhisperStart,
    WhisperBroadcast,
    WhisperEnd,
}

impl Request {
    pub fn start(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Talk => Request::TalkStart,
            PhaseKind::Whisper => Request::WhisperStart,
        }
    }

    pub fn broadcast(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Talk => Request::TalkBroadcast,
            PhaseKind::Whisper => Request::WhisperBroadcast,
        }
    }

    pub fn end(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Talk => Request::TalkEnd,
            PhaseKind::Whisper => Request::WhisperEnd,
        }
    }

    pub fn kind(&self) -> PhaseKind {
        match self {
            Request::TalkStart | Request::TalkBroadcast | Request::TalkEnd => PhaseKind::Talk,
            Request::WhisperStart | Request::WhisperBroadcast | Request::WhisperEnd => {
                PhaseKind::Whisper
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Request::TalkStart => "TALK_START",
            Request::TalkBroadcast => "TALK_BROADCAST",
            Request::TalkEnd => "TALK_END",
            Request::WhisperStart => "WHISPER_START",
            Request::WhisperBroadcast => "WHISPER_BROADCAST",
            Request::WhisperEnd => "WHISPER_END",
        }
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recipient-specific game information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub game_id: String,
    pub day: u32,
    /// Name of the recipient
    pub agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remain_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub request: Request,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<PhaseSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_history: Option<Vec<Talk>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whisper_history: Option<Vec<Talk>>,
}

impl Packet {
    fn bare(request: Request) -> Self {
        Self {
            request,
            info: None,
            setting: None,
            talk_history: None,
            whisper_history: None,
        }
    }

    fn with_history(mut self, talks: Vec<Talk>) -> Self {
        match self.request.kind() {
            PhaseKind::Talk => self.talk_history = Some(talks),
            PhaseKind::Whisper => self.whisper_history = Some(talks),
        }
        self
    }

    pub fn phase_start(
        kind: PhaseKind,
        info: Info,
        settings: PhaseSettings,
        history: &[Talk],
    ) -> Self {
        let mut packet = Self::bare(Request::start(kind)).with_history(history.to_vec());
        packet.info = Some(info);
        packet.setting = Some(settings);
        packet
    }

    pub fn broadcast(kind: PhaseKind, info: Info, talk: &Talk) -> Self {
        let mut packet = Self::bare(Request::broadcast(kind)).with_history(vec![talk.clone()]);
        packet.info = Some(info);
        packet
    }

    pub fn phase_end(kind: PhaseKind) -> Self {
        Self::bare(Request::end(kind))
    }

    /// The history carried for this packet's stream, if any.
    pub fn history(&self) -> Option<&[Talk]> {
        match self.request.kind() {
            PhaseKind::Talk => self.talk_history.as_deref(),
            PhaseKind::Whisper => self.whisper_history.as_deref(),
        }
    }

    pub fn remain_count(&self) -> Option<usize> {
        self.info.as_ref().and_then(|i| i.remain_count)
    }
}
