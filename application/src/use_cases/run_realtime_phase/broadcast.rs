//! Phase notifications to every eligible agent.

use crate::agent::ConnectedAgent;
use realtalk_domain::{Info, Packet, PhaseKind, PhaseSettings, QuotaTracker, Talk};
use tracing::error;

/// Sends start, per-message and end packets for one phase.
///
/// Packets always go to the full eligible list, including agents whose
/// connection has already failed; a failed send is logged and skipped.
pub(super) struct PhaseBroadcaster<'a> {
    game_id: &'a str,
    day: u32,
    kind: PhaseKind,
    agents: &'a [ConnectedAgent],
}

impl<'a> PhaseBroadcaster<'a> {
    pub(super) fn new(
        game_id: &'a str,
        day: u32,
        kind: PhaseKind,
        agents: &'a [ConnectedAgent],
    ) -> Self {
        Self {
            game_id,
            day,
            kind,
            agents,
        }
    }

    fn info(&self, agent: &ConnectedAgent, tracker: &QuotaTracker) -> Info {
        Info {
            game_id: self.game_id.to_string(),
            day: self.day,
            agent: agent.name().to_string(),
            remain_count: Some(tracker.remaining(agent.id())),
        }
    }

    pub(super) async fn phase_start(
        &self,
        tracker: &QuotaTracker,
        settings: &PhaseSettings,
        history: &[Talk],
    ) {
        for agent in self.agents {
            let packet =
                Packet::phase_start(self.kind, self.info(agent, tracker), *settings, history);
            self.deliver(agent, &packet).await;
        }
    }

    pub(super) async fn message(&self, tracker: &QuotaTracker, talk: &Talk) {
        for agent in self.agents {
            let packet = Packet::broadcast(self.kind, self.info(agent, tracker), talk);
            self.deliver(agent, &packet).await;
        }
    }

    pub(super) async fn phase_end(&self) {
        let packet = Packet::phase_end(self.kind);
        for agent in self.agents {
            self.deliver(agent, &packet).await;
        }
    }

    async fn deliver(&self, agent: &ConnectedAgent, packet: &Packet) {
        if let Err(e) = agent.connection().send(packet).await {
            error!(
                game_id = self.game_id,
                agent = agent.name(),
                request = %packet.request,
                error = %e,
                "Failed to send real-time packet"
            );
        }
    }
}
