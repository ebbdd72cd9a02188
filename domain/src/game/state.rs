//! Per-game state owned by the surrounding session.

use crate::core::error::DomainError;
use crate::participant::ParticipantId;
use crate::talk::{PhaseKind, Talk, TalkHistory};
use std::collections::HashMap;

/// State of one running game.
///
/// Holds the current day's talk and whisper histories, plus for each stream
/// the index up to which every participant has already been sent entries.
/// A phase borrows the state mutably for its whole duration, which makes the
/// phase the only writer of the histories while it runs.
#[derive(Debug, Clone)]
pub struct GameState {
    game_id: String,
    day: u32,
    talks: TalkHistory,
    whispers: TalkHistory,
    last_talk_idx: HashMap<ParticipantId, usize>,
    last_whisper_idx: HashMap<ParticipantId, usize>,
}

impl GameState {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            day: 0,
            talks: TalkHistory::new(),
            whispers: TalkHistory::new(),
            last_talk_idx: HashMap::new(),
            last_whisper_idx: HashMap::new(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Move to `day`, clearing the previous day's streams.
    pub fn start_day(&mut self, day: u32) -> Result<(), DomainError> {
        if day < self.day {
            return Err(DomainError::DayRegression {
                current: self.day,
                requested: day,
            });
        }
        if day != self.day {
            self.talks.clear();
            self.whispers.clear();
            self.last_talk_idx.clear();
            self.last_whisper_idx.clear();
        }
        self.day = day;
        Ok(())
    }

    pub fn history(&self, kind: PhaseKind) -> &TalkHistory {
        match kind {
            PhaseKind::Talk => &self.talks,
            PhaseKind::Whisper => &self.whispers,
        }
    }

    pub fn history_mut(&mut self, kind: PhaseKind) -> &mut TalkHistory {
        match kind {
            PhaseKind::Talk => &mut self.talks,
            PhaseKind::Whisper => &mut self.whispers,
        }
    }

    fn last_seen_map(&self, kind: PhaseKind) -> &HashMap<ParticipantId, usize> {
        match kind {
            PhaseKind::Talk => &self.last_talk_idx,
            PhaseKind::Whisper => &self.last_whisper_idx,
        }
    }

    /// Index up to which `participant` has been sent entries of `kind`.
    pub fn last_seen(&self, kind: PhaseKind, participant: ParticipantId) -> usize {
        self.last_seen_map(kind)
            .get(&participant)
            .copied()
            .unwrap_or(0)
    }

    pub fn mark_seen(&mut self, kind: PhaseKind, participant: ParticipantId, idx: usize) {
        let map = match kind {
            PhaseKind::Talk => &mut self.last_talk_idx,
            PhaseKind::Whisper => &mut self.last_whisper_idx,
        };
        map.insert(participant, idx);
    }

    /// Entries of `kind` that `participant` has not been sent yet.
    pub fn unseen(&self, kind: PhaseKind, participant: ParticipantId) -> &[Talk] {
        self.history(kind).since(self.last_seen(kind, participant))
    }
}
