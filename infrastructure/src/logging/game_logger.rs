//! Transcript file writer for game events.
//!
//! Every game gets its own `<game_id>.log` file under the configured
//! directory. Lines are appended as they arrive and flushed immediately so
//! a crashed server still leaves a usable transcript.

use realtalk_application::GameLogger;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger that keeps one open file per game id.
///
/// Thread-safe via `Mutex`. Flushes on `Drop`.
pub struct FileGameLogger {
    dir: PathBuf,
    writers: Mutex<HashMap<String, BufWriter<File>>>,
}

impl FileGameLogger {
    /// Create a logger writing under `dir`.
    ///
    /// Creates the directory if it doesn't exist.
    /// Returns `None` if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(
                "Could not create game log directory {}: {}",
                dir.display(),
                e
            );
            return None;
        }
        Some(Self {
            dir: dir.to_path_buf(),
            writers: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the transcript file for `game_id`.
    pub fn path_for(&self, game_id: &str) -> PathBuf {
        // Keep ids from escaping the log directory
        let file_name: String = game_id
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.dir.join(format!("{file_name}.log"))
    }

    fn open(&self, game_id: &str) -> Option<BufWriter<File>> {
        let path = self.path_for(game_id);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                warn!("Could not open game log file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl GameLogger for FileGameLogger {
    fn append_log(&self, game_id: &str, line: &str) {
        let Ok(mut writers) = self.writers.lock() else {
            return;
        };
        if !writers.contains_key(game_id) {
            let Some(writer) = self.open(game_id) else {
                return;
            };
            writers.insert(game_id.to_string(), writer);
        }
        if let Some(writer) = writers.get_mut(game_id) {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for FileGameLogger {
    fn drop(&mut self) {
        if let Ok(mut writers) = self.writers.lock() {
            for writer in writers.values_mut() {
                let _ = writer.flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_appended_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileGameLogger::new(dir.path()).unwrap();

        logger.append_log("game-a", "1,talk,0,0,1,hello");
        logger.append_log("game-b", "1,whisper,0,0,2,psst");
        logger.append_log("game-a", "1,talk,1,0,3,hi");

        let a = std::fs::read_to_string(logger.path_for("game-a")).unwrap();
        let b = std::fs::read_to_string(logger.path_for("game-b")).unwrap();
        assert_eq!(a, "1,talk,0,0,1,hello\n1,talk,1,0,3,hi\n");
        assert_eq!(b, "1,whisper,0,0,2,psst\n");
    }

    #[test]
    fn test_existing_transcript_is_extended() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("g.log"), "earlier\n").unwrap();

        let logger = FileGameLogger::new(dir.path()).unwrap();
        logger.append_log("g", "later");
        drop(logger);

        let content = std::fs::read_to_string(dir.path().join("g.log")).unwrap();
        assert_eq!(content, "earlier\nlater\n");
    }

    #[test]
    fn test_game_id_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileGameLogger::new(dir.path()).unwrap();
        let path = logger.path_for("../evil");
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("log").join("game");
        let logger = FileGameLogger::new(&nested).unwrap();
        logger.append_log("g", "x");
        assert!(nested.join("g.log").exists());
    }
}
