//! Live viewer port

use realtalk_domain::ViewerEvent;

/// Forwards accepted messages to live viewers.
pub trait ViewerBroadcaster: Send + Sync {
    fn broadcast(&self, event: ViewerEvent);
}

/// No-op viewer for when nobody is watching
pub struct NoViewer;

impl ViewerBroadcaster for NoViewer {
    fn broadcast(&self, _event: ViewerEvent) {}
}
