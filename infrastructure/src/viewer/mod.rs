//! Live viewer feed.

mod channel;
mod event_log;

pub use channel::ChannelViewerBroadcaster;
pub use event_log::record_viewer_events;
