//! Progress reporting while a session runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use realtalk_application::{PhaseReport, SessionProgressNotifier};
use realtalk_domain::{PhaseKind, Talk};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per running phase
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_display_name(kind: PhaseKind) -> &'static str {
        match kind {
            PhaseKind::Talk => "Talk",
            PhaseKind::Whisper => "Whisper",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProgressNotifier for ProgressReporter {
    fn on_day_start(&self, day: u32) {
        println!("{} {}", "->".cyan(), format!("Day {day}").bold());
    }

    fn on_phase_start(&self, day: u32, kind: PhaseKind, agents: usize) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Day {day} {}", Self::phase_display_name(kind)));
        pb.set_message(format!("{agents} agents talking..."));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_phase_complete(&self, _day: u32, report: &PhaseReport, appended: &[Talk]) {
        let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        let message = if report.end_reason.ran() {
            format!(
                "{} ({} messages, {})",
                "done".green(),
                appended.len(),
                report.end_reason
            )
        } else {
            format!("{}", "skipped".yellow())
        };
        pb.finish_with_message(message);
    }
}

/// Simple text-based progress that prints each message as a line
pub struct SimpleProgress;

impl SessionProgressNotifier for SimpleProgress {
    fn on_day_start(&self, day: u32) {
        println!("{} {}", "->".cyan(), format!("Day {day}").bold());
    }

    fn on_phase_start(&self, _day: u32, kind: PhaseKind, agents: usize) {
        println!(
            "  {} ({} agents)",
            ProgressReporter::phase_display_name(kind).bold(),
            agents
        );
    }

    fn on_phase_complete(&self, _day: u32, report: &PhaseReport, appended: &[Talk]) {
        for talk in appended {
            println!("    {} {}", format!("{}:", talk.agent).green(), talk.text);
        }
        println!("  {} {}", "v".green(), report.end_reason);
    }
}
