//! Quota and rate bookkeeping for one phase
//!
//! [`QuotaTracker`] is created fresh for every phase and is only ever touched
//! by the coordinator task, so it needs no synchronization.

use super::setting::{MaxCount, MaxLength};
use super::utterance::Utterance;
use crate::core::string::truncate_chars;
use crate::participant::ParticipantId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Why an inbound message was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Sender is not part of this phase
    NotEligible,
    /// Sender's connection has failed
    Errored,
    /// Sender already declared OVER
    AlreadyOver,
    /// SKIP or FORCE_SKIP
    Skip,
    /// Sent again before the minimum interval elapsed
    RateLimited,
    /// Per-agent quota used up
    QuotaExhausted,
    /// Nothing left to say after truncation
    Empty,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NotEligible => "not_eligible",
            Rejection::Errored => "errored",
            Rejection::AlreadyOver => "already_over",
            Rejection::Skip => "skip",
            Rejection::RateLimited => "rate_limited",
            Rejection::QuotaExhausted => "quota_exhausted",
            Rejection::Empty => "empty",
        }
    }
}

/// Verdict for one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission<'a> {
    Rejected(Rejection),
    /// The sender is now over; `all_over` is set when nobody is left
    Over { all_over: bool },
    /// The message may be appended; `text` is already truncated
    Accepted { text: &'a str, truncated: bool },
}

#[derive(Debug, Clone)]
struct Slot {
    remaining: usize,
    over: bool,
    last_accepted: Option<Instant>,
}

/// Per-phase remaining counts, over flags, rate-limit timestamps and the
/// phase-wide accepted counter.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    slots: HashMap<ParticipantId, Slot>,
    per_day: usize,
    rate_limit: Duration,
    total_accepted: usize,
}

impl QuotaTracker {
    /// One slot per participant, each starting at the per-agent quota.
    pub fn new(
        participants: impl IntoIterator<Item = ParticipantId>,
        max_count: &MaxCount,
        rate_limit: Duration,
    ) -> Self {
        let slots = participants
            .into_iter()
            .map(|id| {
                (
                    id,
                    Slot {
                        remaining: max_count.per_agent,
                        over: false,
                        last_accepted: None,
                    },
                )
            })
            .collect();
        Self {
            slots,
            per_day: max_count.per_day,
            rate_limit,
            total_accepted: 0,
        }
    }

    pub fn remaining(&self, id: ParticipantId) -> usize {
        self.slots.get(&id).map_or(0, |s| s.remaining)
    }

    pub fn is_over(&self, id: ParticipantId) -> bool {
        self.slots.get(&id).is_some_and(|s| s.over)
    }

    /// Flag `id` as over. Returns whether every participant is now over.
    pub fn mark_over(&mut self, id: ParticipantId) -> bool {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.over = true;
        }
        self.all_over()
    }

    pub fn all_over(&self) -> bool {
        self.slots.values().all(|s| s.over)
    }

    /// Whether `id` spoke less than the rate-limit interval before `now`.
    pub fn is_rate_limited(&self, id: ParticipantId, now: Instant) -> bool {
        if self.rate_limit.is_zero() {
            return false;
        }
        self.slots
            .get(&id)
            .and_then(|s| s.last_accepted)
            .is_some_and(|last| now.saturating_duration_since(last) < self.rate_limit)
    }

    pub fn total_accepted(&self) -> usize {
        self.total_accepted
    }

    /// Whether a configured per-day quota has been met.
    pub fn daily_quota_reached(&self) -> bool {
        self.per_day > 0 && self.total_accepted >= self.per_day
    }

    /// Book an accepted message for `id`.
    pub fn record_accepted(&mut self, id: ParticipantId, now: Instant) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.remaining = slot.remaining.saturating_sub(1);
            slot.last_accepted = Some(now);
            self.total_accepted += 1;
        }
    }

    /// Apply the acceptance policy to one inbound message.
    ///
    /// Only an OVER token mutates the tracker here; an accepted message must
    /// still be booked with [`record_accepted`](Self::record_accepted).
    pub fn admit<'a>(
        &mut self,
        id: ParticipantId,
        has_error: bool,
        raw: &'a str,
        now: Instant,
        max_length: &MaxLength,
    ) -> Admission<'a> {
        if !self.slots.contains_key(&id) {
            return Admission::Rejected(Rejection::NotEligible);
        }
        if has_error {
            return Admission::Rejected(Rejection::Errored);
        }
        if self.is_over(id) {
            return Admission::Rejected(Rejection::AlreadyOver);
        }

        let text = match Utterance::parse(raw) {
            Utterance::Over => {
                return Admission::Over {
                    all_over: self.mark_over(id),
                };
            }
            Utterance::Skip | Utterance::ForceSkip => {
                return Admission::Rejected(Rejection::Skip);
            }
            Utterance::Text(text) => text,
        };

        if self.is_rate_limited(id, now) {
            return Admission::Rejected(Rejection::RateLimited);
        }
        if self.remaining(id) == 0 {
            return Admission::Rejected(Rejection::QuotaExhausted);
        }

        let (text, truncated) = match max_length.limit() {
            Some(limit) => {
                let cut = truncate_chars(text, limit);
                (cut, cut.len() < text.len())
            }
            None => (text, false),
        };

        if text.is_empty() {
            return Admission::Rejected(Rejection::Empty);
        }

        Admission::Accepted { text, truncated }
    }
}
