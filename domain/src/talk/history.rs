//! Append-only talk history

use super::entities::Talk;
use crate::participant::Participant;
use serde::{Deserialize, Serialize};

/// Ordered, append-only list of [`Talk`] entries for one day.
///
/// Indices are assigned on append from the current length, so they are
/// strictly increasing and never repeat while the history lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalkHistory {
    entries: Vec<Talk>,
}

impl TalkHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a real-time entry (turn 0) and return it.
    pub fn append(&mut self, day: u32, speaker: &Participant, text: impl Into<String>) -> &Talk {
        let talk = Talk {
            idx: self.entries.len(),
            day,
            turn: 0,
            agent: speaker.name.clone(),
            text: text.into(),
        };
        self.entries.push(talk);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Talk] {
        &self.entries
    }

    /// Entries from `idx` onwards (empty when `idx` is at or past the end).
    pub fn since(&self, idx: usize) -> &[Talk] {
        self.entries.get(idx..).unwrap_or(&[])
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
