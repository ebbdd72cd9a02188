//! Port for the per-game transcript log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port records the game transcript
//! as one line per event, keyed by game id.

/// Port for appending transcript lines.
///
/// `append_log` is intentionally synchronous and non-fallible so a broken
/// log sink can never disturb a running phase.
pub trait GameLogger: Send + Sync {
    fn append_log(&self, game_id: &str, line: &str);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGameLogger;

impl GameLogger for NoGameLogger {
    fn append_log(&self, _game_id: &str, _line: &str) {}
}
