//! Seating TCP clients as agents.

use super::line_connection::LineConnection;
use realtalk_application::ConnectedAgent;
use realtalk_domain::{Participant, ParticipantId};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Accept `count` clients on `listener`, seating them in arrival order.
///
/// The first client becomes `Agent[01]`, the second `Agent[02]`, and so on.
pub async fn accept_agents(
    listener: &TcpListener,
    count: usize,
) -> std::io::Result<Vec<ConnectedAgent>> {
    let mut agents = Vec::with_capacity(count);
    while agents.len() < count {
        let (stream, addr) = listener.accept().await?;
        stream.set_nodelay(true)?;
        let participant = Participant::seated(ParticipantId::new(agents.len() + 1));
        info!(
            agent = %participant.name,
            peer = %addr,
            seated = agents.len() + 1,
            total = count,
            "Agent connected"
        );
        let connection = Arc::new(LineConnection::from_tcp(stream));
        agents.push(ConnectedAgent::new(participant, connection));
    }
    Ok(agents)
}
