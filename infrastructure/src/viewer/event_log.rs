//! JSON Lines recorder for the viewer feed.

use realtalk_domain::ViewerEvent;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Append every event from `rx` to `path`, one JSON object per line.
///
/// Runs until all senders are dropped and returns the number of events
/// written. Events lost to lag are skipped with a warning.
pub async fn record_viewer_events(
    mut rx: broadcast::Receiver<ViewerEvent>,
    path: impl AsRef<Path>,
) -> std::io::Result<usize> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())
        .await?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;

    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Viewer event log fell behind");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        let line = serde_json::to_string(&event).map_err(std::io::Error::other)?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::ChannelViewerBroadcaster;
    use realtalk_application::ViewerBroadcaster;
    use realtalk_domain::PhaseKind;

    fn event(message: &str) -> ViewerEvent {
        ViewerEvent {
            game_id: "g".to_string(),
            day: 1,
            event: PhaseKind::Whisper,
            message: message.to_string(),
            bubble_idx: 3,
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_records_events_until_feed_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.jsonl");
        let viewer = ChannelViewerBroadcaster::default();
        let recorder = tokio::spawn(record_viewer_events(viewer.subscribe(), path.clone()));

        viewer.broadcast(event("first"));
        viewer.broadcast(event("second"));
        drop(viewer);

        assert_eq!(recorder.await.unwrap().unwrap(), 2);
        let content = std::fs::read_to_string(&path).unwrap();
        let events: Vec<ViewerEvent> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].event, PhaseKind::Whisper);
    }
}
