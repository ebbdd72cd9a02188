//! Run Realtime Phase use case
//!
//! Coordinates one real-time talk or whisper phase: every eligible agent may
//! speak at any moment, and every accepted message is broadcast at once.
//!
//! # Flow
//!
//! ```text
//! Starting ─► Active ─► Ending ─► Draining ─► Done
//!    │           │          │          │         │
//!    │           │          │          │         └─ mark history as seen
//!    │           │          │          └─ discard residual input
//!    │           │          └─ cancel listeners, join them, send END
//!    │           └─ listeners ─► mailbox ─► admit ─► append ─► broadcast
//!    └─ resolve timeouts, init quotas, send START
//! ```
//!
//! The coordinator is the only task that touches the quota tracker and the
//! history. Listeners only read their own connection and push raw text into
//! a bounded mailbox; arrival order across agents is whatever the network
//! gives us.

mod broadcast;
mod drain;
mod listener;
mod timers;

use crate::agent::ConnectedAgent;
use crate::ports::game_logger::{GameLogger, NoGameLogger};
use crate::ports::tts::{NoTts, TtsBroadcaster};
use crate::ports::viewer::{NoViewer, ViewerBroadcaster};
use broadcast::PhaseBroadcaster;
use listener::{Inbound, run_listener};
use realtalk_domain::{
    Admission, EndReason, PhaseKind, PhaseSettings, PhaseStage, QuotaTracker, Rejection, Talk,
    TalkHistory, ViewerEvent,
};
use serde::Serialize;
use std::sync::Arc;
use timers::{EffectiveTimeouts, Expiry, TimeoutManager};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default number of raw messages that may wait in the mailbox.
const DEFAULT_MAILBOX_CAPACITY: usize = 100;

/// Input for the RunRealtimePhase use case
#[derive(Debug, Clone)]
pub struct RunRealtimePhaseInput {
    pub kind: PhaseKind,
    /// Agents eligible to speak in this phase
    pub agents: Vec<ConnectedAgent>,
    pub settings: PhaseSettings,
}

impl RunRealtimePhaseInput {
    pub fn new(kind: PhaseKind, agents: Vec<ConnectedAgent>, settings: PhaseSettings) -> Self {
        Self {
            kind,
            agents,
            settings,
        }
    }
}

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub kind: PhaseKind,
    pub end_reason: EndReason,
    /// Messages accepted during the phase
    pub accepted: usize,
    /// Accepted messages that were cut to the length limit
    pub truncated: usize,
    /// History length when the phase started; the first new entry's index
    pub first_idx: usize,
    /// History length when the phase returned
    pub history_len: usize,
    /// Stale messages discarded after the phase ended
    pub drained: usize,
}

impl PhaseReport {
    fn skipped(kind: PhaseKind, history_len: usize) -> Self {
        Self {
            kind,
            end_reason: EndReason::InsufficientParticipants,
            accepted: 0,
            truncated: 0,
            first_idx: history_len,
            history_len,
            drained: 0,
        }
    }
}

/// Per-phase state shared by the coordinator's handlers.
struct ActivePhase<'a> {
    game_id: &'a str,
    day: u32,
    kind: PhaseKind,
    agents: &'a [ConnectedAgent],
    settings: PhaseSettings,
    tracker: QuotaTracker,
    broadcaster: PhaseBroadcaster<'a>,
    truncated: usize,
}

impl ActivePhase<'_> {
    fn agent(&self, id: realtalk_domain::ParticipantId) -> Option<&ConnectedAgent> {
        self.agents.iter().find(|a| a.id() == id)
    }
}

/// Use case for running a real-time talk or whisper phase
pub struct RunRealtimePhaseUseCase {
    game_logger: Arc<dyn GameLogger>,
    viewer: Arc<dyn ViewerBroadcaster>,
    tts: Arc<dyn TtsBroadcaster>,
    mailbox_capacity: usize,
}

impl Default for RunRealtimePhaseUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRealtimePhaseUseCase {
    /// Create a use case with no-op collaborators
    pub fn new() -> Self {
        Self {
            game_logger: Arc::new(NoGameLogger),
            viewer: Arc::new(NoViewer),
            tts: Arc::new(NoTts),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }

    pub fn with_game_logger(mut self, logger: Arc<dyn GameLogger>) -> Self {
        self.game_logger = logger;
        self
    }

    pub fn with_viewer(mut self, viewer: Arc<dyn ViewerBroadcaster>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn with_tts(mut self, tts: Arc<dyn TtsBroadcaster>) -> Self {
        self.tts = tts;
        self
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity.max(1);
        self
    }

    /// Run one phase to completion.
    ///
    /// Never fails: connection problems are confined to the affected agent
    /// and every exit path reaches [`PhaseStage::Done`].
    pub async fn execute(
        &self,
        game: &mut realtalk_domain::GameState,
        input: RunRealtimePhaseInput,
    ) -> PhaseReport {
        let RunRealtimePhaseInput {
            kind,
            agents,
            settings,
        } = input;
        let game_id = game.game_id().to_string();
        let game_id = game_id.as_str();
        let day = game.day();
        let first_idx = game.history(kind).len();

        if agents.len() < 2 {
            warn!(
                game_id,
                kind = %kind,
                agents = agents.len(),
                "Fewer than two agents; skipping real-time phase"
            );
            return PhaseReport::skipped(kind, first_idx);
        }

        // Starting
        debug!(game_id, stage = %PhaseStage::Starting, kind = %kind);
        let timeouts = EffectiveTimeouts::resolve(&settings.realtime, game_id);
        info!(
            game_id,
            day,
            kind = %kind,
            agents = agents.len(),
            "Starting real-time phase"
        );

        let mut phase = ActivePhase {
            game_id,
            day,
            kind,
            agents: &agents,
            settings,
            tracker: QuotaTracker::new(
                agents.iter().map(|a| a.id()),
                &settings.talk.max_count,
                settings.realtime.rate_limit,
            ),
            broadcaster: PhaseBroadcaster::new(game_id, day, kind, &agents),
            truncated: 0,
        };
        phase
            .broadcaster
            .phase_start(&phase.tracker, &settings, game.history(kind).entries())
            .await;

        // Active
        debug!(game_id, stage = %PhaseStage::Active, kind = %kind);
        let (tx, mut mailbox) = mpsc::channel::<Inbound>(self.mailbox_capacity);
        let stop = CancellationToken::new();
        let mut listeners = JoinSet::new();
        for agent in &agents {
            listeners.spawn(run_listener(
                agent.clone(),
                tx.clone(),
                stop.clone(),
                game_id.to_string(),
            ));
        }
        drop(tx);

        let mut timers = TimeoutManager::start(&timeouts);
        let mut mailbox_open = true;
        let history = game.history_mut(kind);

        let end_reason = loop {
            tokio::select! {
                msg = mailbox.recv(), if mailbox_open => match msg {
                    Some(inbound) => {
                        if let Some(reason) =
                            self.on_inbound(&mut phase, history, &mut timers, inbound).await
                        {
                            break reason;
                        }
                    }
                    None => {
                        debug!(game_id, "All listeners have exited; waiting for timeouts");
                        mailbox_open = false;
                    }
                },
                expiry = timers.expired() => {
                    break match expiry {
                        Expiry::Phase => {
                            info!(game_id, "Phase timeout reached; ending phase");
                            EndReason::PhaseTimeout
                        }
                        Expiry::Silence => {
                            info!(game_id, "Silence timeout reached; ending phase");
                            EndReason::SilenceTimeout
                        }
                    };
                }
            }
        };

        // Ending
        debug!(game_id, stage = %PhaseStage::Ending, reason = %end_reason);
        stop.cancel();
        while let Some(result) = listeners.join_next().await {
            if let Err(e) = result {
                warn!(game_id, error = %e, "Listener task failed");
            }
        }
        // Anything still queued arrived after the decision to end
        drop(mailbox);
        phase.broadcaster.phase_end().await;

        // Draining
        debug!(game_id, stage = %PhaseStage::Draining);
        let drained = drain::drain_agents(&agents, timeouts.drain, game_id).await;

        // Done
        let accepted = phase.tracker.total_accepted();
        let history_len = game.history(kind).len();
        for agent in &agents {
            game.mark_seen(kind, agent.id(), history_len);
        }
        debug!(game_id, stage = %PhaseStage::Done);
        info!(
            game_id,
            day,
            kind = %kind,
            reason = %end_reason,
            accepted,
            total = history_len,
            "Real-time phase finished"
        );

        PhaseReport {
            kind,
            end_reason,
            accepted,
            truncated: phase.truncated,
            first_idx,
            history_len,
            drained,
        }
    }

    /// Handle one mailbox message. Returns a reason when the phase must end.
    async fn on_inbound(
        &self,
        phase: &mut ActivePhase<'_>,
        history: &mut TalkHistory,
        timers: &mut TimeoutManager,
        inbound: Inbound,
    ) -> Option<EndReason> {
        let agent = phase.agent(inbound.sender)?.clone();
        let game_id = phase.game_id;
        let now = Instant::now().into_std();

        let admission = phase.tracker.admit(
            agent.id(),
            agent.has_error(),
            &inbound.text,
            now,
            &phase.settings.talk.max_length,
        );

        let (text, truncated) = match admission {
            Admission::Rejected(reason) => {
                match reason {
                    Rejection::Skip => info!(game_id, agent = agent.name(), "Agent skipped"),
                    Rejection::RateLimited
                    | Rejection::QuotaExhausted
                    | Rejection::Empty => warn!(
                        game_id,
                        agent = agent.name(),
                        reason = reason.as_str(),
                        "Ignored message"
                    ),
                    Rejection::NotEligible | Rejection::Errored | Rejection::AlreadyOver => debug!(
                        game_id,
                        agent = agent.name(),
                        reason = reason.as_str(),
                        "Dropped message"
                    ),
                }
                return None;
            }
            Admission::Over { all_over } => {
                info!(game_id, agent = agent.name(), "Agent is over");
                if all_over {
                    info!(game_id, "All agents are over; ending phase");
                    return Some(EndReason::AllOver);
                }
                return None;
            }
            Admission::Accepted { text, truncated } => (text, truncated),
        };

        if truncated {
            phase.truncated += 1;
            warn!(
                game_id,
                agent = agent.name(),
                max_length = ?phase.settings.talk.max_length.limit(),
                "Message exceeded maximum length; truncated"
            );
        }

        phase.tracker.record_accepted(agent.id(), now);
        timers.reset_silence();
        let talk = history.append(phase.day, agent.participant(), text).clone();

        info!(
            game_id,
            agent = agent.name(),
            idx = talk.idx,
            text = %talk.text,
            remain_count = phase.tracker.remaining(agent.id()),
            "Accepted real-time message"
        );

        phase.broadcaster.message(&phase.tracker, &talk).await;
        self.publish(phase, &agent, &talk);

        if phase.tracker.daily_quota_reached() {
            info!(
                game_id,
                total = phase.tracker.total_accepted(),
                "Phase message quota reached; ending phase"
            );
            return Some(EndReason::DailyQuotaReached);
        }
        None
    }

    /// Hand an accepted entry to the transcript log, viewer and TTS.
    fn publish(&self, phase: &ActivePhase<'_>, agent: &ConnectedAgent, talk: &Talk) {
        let speaker_idx = agent.id().index();
        self.game_logger.append_log(
            phase.game_id,
            &transcript_line(phase.kind, talk, speaker_idx),
        );
        self.viewer.broadcast(ViewerEvent {
            game_id: phase.game_id.to_string(),
            day: phase.day,
            event: phase.kind,
            message: talk.text.clone(),
            bubble_idx: speaker_idx,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        });
        if let Some(voice_id) = agent.participant().voice_id() {
            self.tts.broadcast_text(phase.game_id, &talk.text, voice_id);
        }
    }
}

/// Transcript line: `day,kind,idx,turn,speaker_idx,text`.
fn transcript_line(kind: PhaseKind, talk: &Talk, speaker_idx: usize) -> String {
    format!(
        "{},{},{},{},{},{}",
        talk.day,
        kind.as_str(),
        talk.idx,
        talk.turn,
        speaker_idx,
        talk.text
    )
}
