//! Agent connection port
//!
//! Defines the interface for one agent's full-duplex message channel.
//! The phase engine only needs three things from it: deadline-bounded reads,
//! quick sends, and a way to tell a read timeout apart from a real failure.

use async_trait::async_trait;
use realtalk_domain::Packet;
use thiserror::Error;
use tokio::time::Instant;

/// Errors that can occur on an agent connection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The read deadline passed before a message arrived. Not a failure.
    #[error("Read deadline exceeded")]
    Timeout,

    /// One unusable inbound message. The connection itself is still fine.
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Connection closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to encode packet: {0}")]
    Encode(String),
}

impl ConnectionError {
    /// Check if this error is a read-deadline timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ConnectionError::Timeout)
    }

    /// Check if only the last message was bad and reading may continue
    pub fn is_malformed(&self) -> bool {
        matches!(self, ConnectionError::Malformed(_))
    }
}

/// One agent's message channel.
///
/// Implementations live in the infrastructure layer. At any moment at most
/// one task reads from a connection; the phase engine guarantees this by
/// joining its listeners before the drainer starts.
#[async_trait]
pub trait AgentConnection: Send + Sync {
    /// Set (`Some`) or clear (`None`) the deadline applied to subsequent reads.
    fn set_read_deadline(&self, deadline: Option<Instant>);

    /// Read one text message.
    ///
    /// Returns [`ConnectionError::Timeout`] when the read deadline passes and
    /// [`ConnectionError::Malformed`] for a message that could not be
    /// decoded; neither ends the connection.
    async fn read_message(&self) -> Result<String, ConnectionError>;

    /// Send a packet without waiting for the agent to process it.
    async fn send(&self, packet: &Packet) -> Result<(), ConnectionError>;
}
