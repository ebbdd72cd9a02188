//! Scripted connections and recording collaborators for use case tests.

use crate::agent::ConnectedAgent;
use crate::ports::connection::{AgentConnection, ConnectionError};
use crate::ports::game_logger::GameLogger;
use crate::ports::tts::TtsBroadcaster;
use crate::ports::viewer::ViewerBroadcaster;
use async_trait::async_trait;
use realtalk_domain::{AgentProfile, Packet, Participant, ParticipantId, Request, ViewerEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};

type Incoming = Result<String, ConnectionError>;

/// In-memory connection fed from the test.
///
/// Reads honor the read deadline, so tests run under paused time exercise
/// the same timeout paths as a socket would.
pub(crate) struct ScriptedConnection {
    tx: mpsc::UnboundedSender<Incoming>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Incoming>>,
    deadline: Mutex<Option<Instant>>,
    sent: Mutex<Vec<Packet>>,
    after_end: Mutex<Vec<Incoming>>,
    fail_sends: AtomicBool,
}

impl ScriptedConnection {
    pub(crate) fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            tx,
            rx: tokio::sync::Mutex::new(rx),
            deadline: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            after_end: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        })
    }

    /// Queue a message as if the agent had sent it now.
    pub(crate) fn push(&self, text: &str) {
        let _ = self.tx.send(Ok(format!("{text}\n")));
    }

    /// Queue a message `delay` from now.
    pub(crate) fn push_after(&self, delay: Duration, text: &str) {
        let tx = self.tx.clone();
        let text = format!("{text}\n");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Ok(text));
        });
    }

    /// Queue a message the connection could not decode.
    pub(crate) fn push_malformed(&self) {
        let _ = self
            .tx
            .send(Err(ConnectionError::Malformed("line too long".to_string())));
    }

    /// Break the connection `delay` from now.
    pub(crate) fn fail_after(&self, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Err(ConnectionError::Io("connection reset".to_string())));
        });
    }

    /// Messages the agent "sends" right after it receives the end packet.
    pub(crate) fn send_after_end(&self, lines: &[&str]) {
        self.after_end
            .lock()
            .unwrap()
            .extend(lines.iter().map(|l| Ok(format!("{l}\n"))));
    }

    /// An undecodable message arriving right after the end packet.
    pub(crate) fn send_malformed_after_end(&self) {
        self.after_end
            .lock()
            .unwrap()
            .push(Err(ConnectionError::Malformed("line too long".to_string())));
    }

    pub(crate) fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub(crate) fn sent(&self) -> Vec<Packet> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_requests(&self) -> Vec<Request> {
        self.sent().iter().map(|p| p.request).collect()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        *self.deadline.lock().unwrap()
    }

    /// Whether a read would return immediately.
    pub(crate) fn has_pending_input(&self) -> bool {
        self.rx
            .try_lock()
            .map(|rx| !rx.is_empty())
            .unwrap_or(false)
    }
}

#[async_trait]
impl AgentConnection for ScriptedConnection {
    fn set_read_deadline(&self, deadline: Option<Instant>) {
        *self.deadline.lock().unwrap() = deadline;
    }

    async fn read_message(&self) -> Result<String, ConnectionError> {
        let deadline = self.deadline();
        let mut rx = self.rx.lock().await;
        let next = match deadline {
            Some(deadline) => timeout_at(deadline, rx.recv())
                .await
                .map_err(|_| ConnectionError::Timeout)?,
            None => rx.recv().await,
        };
        next.unwrap_or(Err(ConnectionError::Closed))
    }

    async fn send(&self, packet: &Packet) -> Result<(), ConnectionError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ConnectionError::Io("broken pipe".to_string()));
        }
        self.sent.lock().unwrap().push(packet.clone());
        if matches!(packet.request, Request::TalkEnd | Request::WhisperEnd) {
            for incoming in self.after_end.lock().unwrap().drain(..) {
                let _ = self.tx.send(incoming);
            }
        }
        Ok(())
    }
}

/// Seat `n` agents on scripted connections.
pub(crate) fn scripted_agents(n: usize) -> (Vec<ConnectedAgent>, Vec<Arc<ScriptedConnection>>) {
    let mut agents = Vec::with_capacity(n);
    let mut connections = Vec::with_capacity(n);
    for seat in 1..=n {
        let connection = ScriptedConnection::new();
        let participant = Participant::seated(ParticipantId::new(seat))
            .with_profile(AgentProfile::new(format!("voice-{seat}")));
        agents.push(ConnectedAgent::new(participant, connection.clone()));
        connections.push(connection);
    }
    (agents, connections)
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    lines: Mutex<Vec<(String, String)>>,
}

impl RecordingLogger {
    pub(crate) fn lines(&self) -> Vec<(String, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl GameLogger for RecordingLogger {
    fn append_log(&self, game_id: &str, line: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((game_id.to_string(), line.to_string()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingViewer {
    events: Mutex<Vec<ViewerEvent>>,
}

impl RecordingViewer {
    pub(crate) fn events(&self) -> Vec<ViewerEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ViewerBroadcaster for RecordingViewer {
    fn broadcast(&self, event: ViewerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub(crate) struct RecordingTts {
    spoken: Mutex<Vec<(String, String)>>,
}

impl RecordingTts {
    /// `(text, voice_id)` pairs in call order.
    pub(crate) fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

impl TtsBroadcaster for RecordingTts {
    fn broadcast_text(&self, _game_id: &str, text: &str, voice_id: &str) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string()));
    }
}
