//! Post-phase buffer drain.
//!
//! An agent may still send messages between the moment the end packet is
//! written and the moment it actually stops. Left in the connection, those
//! would be read as the reply to the next synchronous request (a vote, for
//! instance). Draining reads and discards them.

use crate::agent::ConnectedAgent;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

/// Read deadline for one drain poll. An empty poll ends the drain.
pub(super) const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Drain every non-errored agent concurrently, bounded by `window`.
///
/// Returns the total number of discarded messages.
pub(super) async fn drain_agents(
    agents: &[ConnectedAgent],
    window: Duration,
    game_id: &str,
) -> usize {
    let mut tasks = JoinSet::new();
    for agent in agents.iter().filter(|a| !a.has_error()) {
        tasks.spawn(drain_agent(agent.clone(), window, game_id.to_string()));
    }

    let mut total = 0;
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(drained) => total += drained,
            Err(e) => warn!(game_id, error = %e, "Drain task failed"),
        }
    }
    total
}

async fn drain_agent(agent: ConnectedAgent, window: Duration, game_id: String) -> usize {
    let connection = agent.connection();
    let deadline = Instant::now() + window;
    let mut drained = 0;

    while Instant::now() < deadline {
        let poll_deadline = (Instant::now() + DRAIN_POLL_INTERVAL).min(deadline);
        connection.set_read_deadline(Some(poll_deadline));
        match connection.read_message().await {
            Ok(raw) => {
                drained += 1;
                let text = raw.strip_suffix('\n').unwrap_or(&raw);
                info!(game_id = %game_id, agent = agent.name(), text, "Drained stale message");
            }
            // Buffer is empty
            Err(e) if e.is_timeout() => break,
            Err(e) if e.is_malformed() => {
                drained += 1;
                info!(game_id = %game_id, agent = agent.name(), error = %e, "Drained malformed message");
            }
            Err(e) => {
                warn!(game_id = %game_id, agent = agent.name(), error = %e, "Error while draining");
                break;
            }
        }
    }

    connection.set_read_deadline(None);
    if drained > 0 {
        info!(game_id = %game_id, agent = agent.name(), drained, "Drain complete");
    }
    drained
}
