//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod connection;
pub mod game_logger;
pub mod progress;
pub mod tts;
pub mod viewer;
