//! Real-time phase policy
//!
//! Everything the phase coordinator decides without touching a connection:
//! settings, inbound token classification, quota and rate bookkeeping, and
//! the stage / end-reason vocabulary.
//!
//! # Acceptance order
//!
//! ```text
//! inbound text
//!   │
//!   ├─ sender errored or already over ──────────► ignored
//!   ├─ OVER ─────────────────────────────────────► over flag set
//!   ├─ SKIP / FORCE_SKIP ────────────────────────► ignored
//!   ├─ inside rate-limit interval ───────────────► ignored
//!   ├─ no remaining quota ───────────────────────► ignored
//!   ├─ truncate to max characters
//!   ├─ empty after truncation ───────────────────► ignored
//!   └─ accepted
//! ```

pub mod quota;
pub mod setting;
pub mod stage;
pub mod utterance;

pub use quota::{Admission, QuotaTracker, Rejection};
pub use setting::{MaxCount, MaxLength, PhaseSettings, RealtimeSetting, TalkSetting};
pub use stage::{EndReason, PhaseStage};
pub use utterance::Utterance;
