//! Per-agent listener task.
//!
//! Each listener is the only reader of its connection while the phase is
//! active. It polls with a short read deadline so that it notices the stop
//! token within one poll interval even when the agent is silent.

use crate::agent::ConnectedAgent;
use realtalk_domain::ParticipantId;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Read deadline for a single listener poll.
pub(super) const READ_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A raw message waiting in the coordinator's mailbox.
#[derive(Debug)]
pub(super) struct Inbound {
    pub sender: ParticipantId,
    pub text: String,
}

/// Read `agent`'s connection until `stop` is cancelled or the connection fails.
///
/// A malformed message is skipped. Any other read error marks the agent as
/// errored and ends the listener without notifying the mailbox. On stop the read deadline is cleared so the
/// connection is left ready for whoever reads it next.
pub(super) async fn run_listener(
    agent: ConnectedAgent,
    mailbox: mpsc::Sender<Inbound>,
    stop: CancellationToken,
    game_id: String,
) {
    let connection = agent.connection();

    loop {
        if stop.is_cancelled() {
            break;
        }

        connection.set_read_deadline(Some(Instant::now() + READ_POLL_INTERVAL));
        let raw = match connection.read_message().await {
            Ok(raw) => raw,
            Err(e) if e.is_timeout() => continue,
            Err(e) if e.is_malformed() => {
                warn!(game_id = %game_id, agent = agent.name(), error = %e, "Skipping malformed message");
                continue;
            }
            Err(e) => {
                warn!(game_id = %game_id, agent = agent.name(), error = %e, "Real-time listener failed");
                agent.mark_error();
                return;
            }
        };

        let text = raw.strip_suffix('\n').unwrap_or(&raw).to_string();
        trace!(game_id = %game_id, agent = agent.name(), %text, "Listener received message");

        let inbound = Inbound {
            sender: agent.id(),
            text,
        };
        tokio::select! {
            sent = mailbox.send(inbound) => {
                if sent.is_err() {
                    // Coordinator is gone
                    break;
                }
            }
            _ = stop.cancelled() => break,
        }
    }

    connection.set_read_deadline(None);
    debug!(game_id = %game_id, agent = agent.name(), "Real-time listener stopped");
}
