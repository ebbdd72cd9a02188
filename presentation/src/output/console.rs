//! Console output formatter for session results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use realtalk_application::{DayReport, PhaseReport, SessionOutcome};
use realtalk_domain::{EndReason, Talk};

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session with transcripts
    pub fn format(outcome: &SessionOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Game {}", outcome.game_id)));
        output.push('\n');

        for day in &outcome.days {
            output.push_str(&Self::section_header(&format!("Day {}", day.day)));
            output.push_str(&Self::phase_block("Talk", &day.talk, &day.talks));
            if let Some(whisper) = &day.whisper {
                output.push_str(&Self::phase_block("Whisper", whisper, &day.whispers));
            }
        }

        output.push_str(&Self::errored(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &SessionOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format phase summaries only (concise output)
    pub fn format_summary(outcome: &SessionOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            format!("=== Game {} ===", outcome.game_id).cyan().bold()
        ));
        for day in &outcome.days {
            output.push_str(&Self::day_summary(day));
        }
        output.push_str(&Self::errored(outcome));
        output
    }

    fn day_summary(day: &DayReport) -> String {
        let mut line = format!(
            "{} talk: {}",
            format!("Day {}", day.day).bold(),
            Self::phase_summary(&day.talk)
        );
        if let Some(whisper) = &day.whisper {
            line.push_str(&format!(", whisper: {}", Self::phase_summary(whisper)));
        }
        line.push('\n');
        line
    }

    fn phase_block(title: &str, report: &PhaseReport, entries: &[Talk]) -> String {
        let mut output = format!(
            "\n{} {}\n",
            format!("── {title} ──").yellow().bold(),
            Self::phase_summary(report).dimmed()
        );
        let new_entries = entries.get(report.first_idx..).unwrap_or_default();
        if new_entries.is_empty() && report.end_reason.ran() {
            output.push_str(&format!("  {}\n", "(nobody spoke)".dimmed()));
        }
        for talk in new_entries {
            output.push_str(&Self::talk_line(talk));
        }
        output
    }

    fn talk_line(talk: &Talk) -> String {
        format!(
            "  {} {} {}\n",
            format!("#{:<3}", talk.idx).dimmed(),
            format!("{}:", talk.agent).green().bold(),
            Self::indent_continuation(&talk.text, "        ")
        )
    }

    fn phase_summary(report: &PhaseReport) -> String {
        if !report.end_reason.ran() {
            return "skipped (fewer than 2 agents)".to_string();
        }
        let mut summary = format!(
            "{} accepted, ended by {}",
            report.accepted,
            Self::reason_label(report.end_reason)
        );
        if report.truncated > 0 {
            summary.push_str(&format!(", {} truncated", report.truncated));
        }
        if report.drained > 0 {
            summary.push_str(&format!(", {} late discarded", report.drained));
        }
        summary
    }

    fn reason_label(reason: EndReason) -> &'static str {
        match reason {
            EndReason::InsufficientParticipants => "too few agents",
            EndReason::AllOver => "everyone saying OVER",
            EndReason::DailyQuotaReached => "phase quota",
            EndReason::PhaseTimeout => "phase timeout",
            EndReason::SilenceTimeout => "silence",
        }
    }

    fn errored(outcome: &SessionOutcome) -> String {
        if outcome.errored.is_empty() {
            return String::new();
        }
        format!(
            "\n{} {}\n",
            "Disconnected:".red().bold(),
            outcome.errored.join(", ")
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent every line after the first
    fn indent_continuation(text: &str, prefix: &str) -> String {
        text.lines().collect::<Vec<_>>().join(&format!("\n{prefix}"))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &SessionOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &SessionOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_summary(&self, outcome: &SessionOutcome) -> String {
        Self::format_summary(outcome)
    }
}
