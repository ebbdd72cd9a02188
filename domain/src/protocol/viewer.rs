//! Live viewer events

use crate::talk::PhaseKind;
use serde::{Deserialize, Serialize};

/// One accepted message, as shown by a live viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerEvent {
    pub game_id: String,
    pub day: u32,
    pub event: PhaseKind,
    pub message: String,
    /// Seat index of the speaker, used to place the speech bubble
    pub bubble_idx: usize,
    /// RFC 3339 time the message was accepted
    pub timestamp: String,
}
