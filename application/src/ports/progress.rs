//! Progress notification port
//!
//! Defines the interface for reporting progress while a session plays its
//! days and phases.

use realtalk_domain::{PhaseKind, Talk};

use crate::use_cases::run_realtime_phase::PhaseReport;

/// Callback for progress updates during a session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console transcript, JSON stream, etc.)
pub trait SessionProgressNotifier: Send + Sync {
    /// Called when a new day begins
    fn on_day_start(&self, day: u32);

    /// Called when a phase starts, with the number of eligible agents
    fn on_phase_start(&self, day: u32, kind: PhaseKind, agents: usize);

    /// Called when a phase returns, with the entries it appended
    fn on_phase_complete(&self, day: u32, report: &PhaseReport, appended: &[Talk]);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoSessionProgress;

impl SessionProgressNotifier for NoSessionProgress {
    fn on_day_start(&self, _day: u32) {}
    fn on_phase_start(&self, _day: u32, _kind: PhaseKind, _agents: usize) {}
    fn on_phase_complete(&self, _day: u32, _report: &PhaseReport, _appended: &[Talk]) {}
}
