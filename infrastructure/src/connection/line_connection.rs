//! Line-delimited connection adapter.
//!
//! The read half is owned by the connection and polled on demand, which
//! keeps buffered lines intact when a deadline cancels a read. The write
//! half is owned by a background task fed through an unbounded channel, so
//! `send` only enqueues and never waits on a slow agent.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use realtalk_application::{AgentConnection, ConnectionError};
use realtalk_domain::Packet;
use std::sync::Mutex;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use super::codec::{AgentLineCodec, Frame};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, warn};

/// Longest accepted line, in bytes.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// One agent's connection: newline-framed text in both directions.
pub struct LineConnection {
    reader: tokio::sync::Mutex<FramedRead<BoxedReader, AgentLineCodec>>,
    outbox: mpsc::UnboundedSender<String>,
    deadline: Mutex<Option<Instant>>,
    writer_handle: JoinHandle<()>,
}

impl LineConnection {
    /// Wrap a read half and a write half. Must be called inside a tokio runtime.
    pub fn new<R, W>(reader: R, writer: W, peer: impl Into<String>) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let peer = peer.into();
        let reader: BoxedReader = Box::new(reader);
        let (outbox, rx) = mpsc::unbounded_channel();
        let sink = FramedWrite::new(writer, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let writer_handle = tokio::spawn(write_loop(sink, rx, peer));

        Self {
            reader: tokio::sync::Mutex::new(FramedRead::new(
                reader,
                AgentLineCodec::new(MAX_LINE_LENGTH),
            )),
            outbox,
            deadline: Mutex::new(None),
            writer_handle,
        }
    }

    pub fn from_tcp(stream: TcpStream) -> Self {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let (read_half, write_half) = stream.into_split();
        Self::new(read_half, write_half, peer)
    }

    /// Queue a raw line for the agent.
    pub fn send_line(&self, line: impl Into<String>) -> Result<(), ConnectionError> {
        self.outbox
            .send(line.into())
            .map_err(|_| ConnectionError::Closed)
    }

    fn current_deadline(&self) -> Option<Instant> {
        self.deadline.lock().ok().and_then(|d| *d)
    }
}

async fn write_loop<W>(
    mut sink: FramedWrite<W, LinesCodec>,
    mut rx: mpsc::UnboundedReceiver<String>,
    peer: String,
) where
    W: AsyncWrite + Send + Unpin,
{
    while let Some(line) = rx.recv().await {
        if let Err(e) = sink.send(line).await {
            warn!(peer = %peer, error = %e, "Write to agent failed; closing writer");
            return;
        }
    }
    debug!(peer = %peer, "Writer finished");
}

#[async_trait]
impl AgentConnection for LineConnection {
    fn set_read_deadline(&self, deadline: Option<Instant>) {
        if let Ok(mut current) = self.deadline.lock() {
            *current = deadline;
        }
    }

    async fn read_message(&self) -> Result<String, ConnectionError> {
        let deadline = self.current_deadline();
        let mut reader = self.reader.lock().await;
        let next = match deadline {
            Some(deadline) => timeout_at(deadline, reader.next())
                .await
                .map_err(|_| ConnectionError::Timeout)?,
            None => reader.next().await,
        };
        match next {
            Some(Ok(Frame::Line(line))) => Ok(line),
            Some(Ok(Frame::Oversized(len))) => Err(ConnectionError::Malformed(format!(
                "line of {len} bytes exceeds the {MAX_LINE_LENGTH}-byte limit"
            ))),
            Some(Err(e)) => Err(ConnectionError::Io(e.to_string())),
            None => Err(ConnectionError::Closed),
        }
    }

    async fn send(&self, packet: &Packet) -> Result<(), ConnectionError> {
        let json =
            serde_json::to_string(packet).map_err(|e| ConnectionError::Encode(e.to_string()))?;
        self.send_line(json)
    }
}

impl Drop for LineConnection {
    fn drop(&mut self) {
        self.writer_handle.abort();
    }
}
