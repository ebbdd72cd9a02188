//! Output formatter trait

use realtalk_application::SessionOutcome;

/// Trait for formatting session results
pub trait OutputFormatter {
    /// Format the complete session with every transcript
    fn format(&self, outcome: &SessionOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &SessionOutcome) -> String;

    /// Format phase summaries only
    fn format_summary(&self, outcome: &SessionOutcome) -> String;
}
