//! Logging infrastructure: per-game transcript files.
//!
//! Provides [`FileGameLogger`], a line-oriented file writer that implements
//! the [`GameLogger`](realtalk_application::GameLogger) port.

mod game_logger;

pub use game_logger::FileGameLogger;
