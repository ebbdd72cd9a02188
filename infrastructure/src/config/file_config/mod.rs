//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! by [`FileConfig::to_session_config`].

mod logging;
mod output;
mod realtime;
mod server;
mod talk;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use realtime::FileRealtimeConfig;
pub use server::FileServerConfig;
pub use talk::{FileTalkConfig, FileWhisperConfig};

use realtalk_application::SessionConfig;
use realtalk_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected because of one or more error-level issues
#[derive(Debug, Error)]
#[error("invalid configuration: {}", summarize(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agent listener and game length
    pub server: FileServerConfig,
    /// Phase timing
    pub realtime: FileRealtimeConfig,
    /// Public talk quotas
    pub talk: FileTalkConfig,
    /// Whisper quotas and group
    pub whisper: FileWhisperConfig,
    /// Transcript and diagnostic log locations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Server agent count and day count
    /// 2. Duration strings in `[realtime]`
    /// 3. Per-day quotas against per-agent quotas
    /// 4. Whisper group seats
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.server.validate();
        issues.extend(self.realtime.to_realtime_setting().1);
        issues.extend(self.talk.validate("talk"));
        issues.extend(self.whisper.validate(self.server.agents));
        issues
    }

    /// Validate and fail on the first error-level issue set.
    ///
    /// Warnings are returned alongside the config so the caller can print them.
    pub fn validated(&self) -> Result<(SessionConfig, Vec<ConfigIssue>), ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigValidationError {
                issues: issues.into_iter().filter(ConfigIssue::is_error).collect(),
            });
        }
        Ok((self.to_session_config(), issues))
    }

    /// Build the session parameters, using defaults for unparsable values.
    pub fn to_session_config(&self) -> SessionConfig {
        let (realtime, _) = self.realtime.to_realtime_setting();
        SessionConfig::default()
            .with_days(self.server.days)
            .with_talk(self.talk.to_talk_setting())
            .with_whisper(self.whisper.quota.to_talk_setting())
            .with_realtime(realtime)
            .with_whisper_group(self.whisper.group_ids())
    }
}
