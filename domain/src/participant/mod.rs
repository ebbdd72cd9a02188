//! Game participants
//!
//! A participant is one remote agent seated in the game. Per-phase state is
//! always keyed by [`ParticipantId`], never by the participant value itself.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a seated agent (its 1-based seat index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(usize);

impl ParticipantId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// Conventional seat name, e.g. `Agent[03]`.
    pub fn seat_name(&self) -> String {
        format!("Agent[{:02}]", self.0)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seat_name())
    }
}

/// Presentation profile attached to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Voice identifier handed to the text-to-speech broadcaster.
    pub voice_id: String,
}

impl AgentProfile {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
        }
    }
}

/// A seated agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AgentProfile>,
}

impl Participant {
    /// Create a participant with an explicit name.
    ///
    /// Names are trimmed; an empty name is rejected.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidParticipantName(name));
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
            profile: None,
        })
    }

    /// Create a participant named after its seat.
    pub fn seated(id: ParticipantId) -> Self {
        Self {
            id,
            name: id.seat_name(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: AgentProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn voice_id(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.voice_id.as_str())
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_name_is_zero_padded() {
        assert_eq!(ParticipantId::new(3).seat_name(), "Agent[03]");
        assert_eq!(ParticipantId::new(12).to_string(), "Agent[12]");
    }

    #[test]
    fn test_new_trims_name() {
        let p = Participant::new(ParticipantId::new(1), "  alice ").unwrap();
        assert_eq!(p.name, "alice");
        assert!(p.voice_id().is_none());
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let err = Participant::new(ParticipantId::new(1), "   ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidParticipantName(_)));
    }

    #[test]
    fn test_voice_id_from_profile() {
        let p = Participant::seated(ParticipantId::new(2)).with_profile(AgentProfile::new("v-7"));
        assert_eq!(p.voice_id(), Some("v-7"));
        assert_eq!(p.to_string(), "Agent[02]");
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ParticipantId::new(4)).unwrap();
        assert_eq!(json, "4");
    }
}
