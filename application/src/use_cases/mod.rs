//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_realtime_phase;
pub mod run_session;
