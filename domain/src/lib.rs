//! Domain layer for realtalk
//!
//! This crate contains the core game vocabulary and the pure policy of
//! real-time speaking phases. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Real-time phase
//!
//! A bounded window in which every eligible agent may speak at will:
//!
//! - **Talk**: public, among all living agents
//! - **Whisper**: restricted to the whisper group
//!
//! Messages are admitted by [`QuotaTracker::admit`] and appended to a
//! [`TalkHistory`] owned by the [`GameState`].

pub mod config;
pub mod core;
pub mod game;
pub mod participant;
pub mod phase;
pub mod protocol;
pub mod talk;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, string::truncate_chars};
pub use game::GameState;
pub use participant::{AgentProfile, Participant, ParticipantId};
pub use phase::{
    Admission, EndReason, MaxCount, MaxLength, PhaseSettings, PhaseStage, QuotaTracker,
    RealtimeSetting, Rejection, TalkSetting, Utterance,
};
pub use protocol::{Info, Packet, Request, ViewerEvent};
pub use talk::{PhaseKind, Talk, TalkHistory};
