//! Connected agents
//!
//! Binds a seated [`Participant`] to its connection and its sticky error flag.

use crate::ports::connection::AgentConnection;
use realtalk_domain::{Participant, ParticipantId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A participant together with its live connection.
///
/// Cloning is cheap and every clone shares the same connection and error
/// flag. Once a hard connection error is observed the flag stays set for
/// the rest of the game.
#[derive(Clone)]
pub struct ConnectedAgent {
    participant: Participant,
    connection: Arc<dyn AgentConnection>,
    has_error: Arc<AtomicBool>,
}

impl ConnectedAgent {
    pub fn new(participant: Participant, connection: Arc<dyn AgentConnection>) -> Self {
        Self {
            participant,
            connection,
            has_error: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn id(&self) -> ParticipantId {
        self.participant.id
    }

    pub fn name(&self) -> &str {
        &self.participant.name
    }

    pub fn connection(&self) -> &dyn AgentConnection {
        self.connection.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.has_error.load(Ordering::Acquire)
    }

    pub fn mark_error(&self) {
        self.has_error.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for ConnectedAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectedAgent")
            .field("participant", &self.participant)
            .field("has_error", &self.has_error())
            .finish_non_exhaustive()
    }
}
