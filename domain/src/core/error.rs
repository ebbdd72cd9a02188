//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown phase kind: {0}. Valid: talk, whisper")]
    UnknownPhaseKind(String),

    #[error("Invalid participant name: {0:?}")]
    InvalidParticipantName(String),

    #[error("Day cannot go backwards (current {current}, requested {requested})")]
    DayRegression { current: u32, requested: u32 },
}
