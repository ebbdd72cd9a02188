//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// game_log_dir = "./log/game"   # per-game transcript files
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for `<game_id>.log` transcript files; disabled when unset
    pub game_log_dir: Option<PathBuf>,
    /// Directory for diagnostic log files; overridden by `--log-dir`
    pub log_dir: Option<PathBuf>,
}
