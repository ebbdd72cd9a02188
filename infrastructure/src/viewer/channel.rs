//! In-process viewer feed on a `tokio::sync::broadcast` channel.
//!
//! Any number of subscribers (a websocket bridge, the event log) can follow
//! the game. Publishing never waits: with no subscriber the event is simply
//! dropped, and a subscriber that falls behind loses the oldest events.

use realtalk_application::ViewerBroadcaster;
use realtalk_domain::ViewerEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Events kept for a slow subscriber before it starts lagging.
const DEFAULT_VIEWER_CAPACITY: usize = 256;

pub struct ChannelViewerBroadcaster {
    tx: broadcast::Sender<ViewerEvent>,
}

impl Default for ChannelViewerBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER_CAPACITY)
    }
}

impl ChannelViewerBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewerEvent> {
        self.tx.subscribe()
    }
}

impl ViewerBroadcaster for ChannelViewerBroadcaster {
    fn broadcast(&self, event: ViewerEvent) {
        if self.tx.send(event).is_err() {
            trace!("No viewer subscribed; event dropped");
        }
    }
}
