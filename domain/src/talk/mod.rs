//! Talk history domain
//!
//! Entries spoken during a day, split into the public talk stream and the
//! restricted whisper stream.

pub mod entities;
pub mod history;

pub use entities::{PhaseKind, Talk};
pub use history::TalkHistory;
