//! Application layer for realtalk
//!
//! This crate contains the real-time phase engine, the session use case,
//! port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod agent;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use agent::ConnectedAgent;
pub use config::SessionConfig;
pub use ports::{
    connection::{AgentConnection, ConnectionError},
    game_logger::{GameLogger, NoGameLogger},
    progress::{NoSessionProgress, SessionProgressNotifier},
    tts::{NoTts, TtsBroadcaster},
    viewer::{NoViewer, ViewerBroadcaster},
};
pub use use_cases::run_realtime_phase::{
    PhaseReport, RunRealtimePhaseInput, RunRealtimePhaseUseCase,
};
pub use use_cases::run_session::{
    DayReport, RunSessionError, RunSessionInput, RunSessionUseCase, SessionOutcome,
};
