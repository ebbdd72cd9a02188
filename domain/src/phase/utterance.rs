//! Classification of inbound agent text

/// Inbound text after trailing-newline trimming.
///
/// Reserved tokens are matched exactly and case-sensitively. Both the
/// upper-case forms and the spellings used by the agent protocol library are
/// recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utterance<'a> {
    /// The agent will say nothing more this phase
    Over,
    /// A no-op turn
    Skip,
    /// A no-op turn forced by the agent runtime
    ForceSkip,
    /// Candidate message text
    Text(&'a str),
}

impl<'a> Utterance<'a> {
    pub fn parse(text: &'a str) -> Self {
        match text {
            "OVER" | "Over" => Utterance::Over,
            "SKIP" | "Skip" => Utterance::Skip,
            "FORCE_SKIP" | "ForceSkip" => Utterance::ForceSkip,
            other => Utterance::Text(other),
        }
    }
}
