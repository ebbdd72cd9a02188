//! Real-time timing configuration from TOML (`[realtime]` section)

use realtalk_domain::{ConfigIssue, ConfigIssueCode, RealtimeSetting};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw timing configuration from TOML
///
/// Durations are human-readable strings parsed with `humantime`.
/// A zero timeout falls back to the built-in default at phase start.
///
/// # Example
///
/// ```toml
/// [realtime]
/// phase_timeout = "2m"
/// silence_timeout = "30s"
/// rate_limit = "1s 500ms"   # "0s" disables rate limiting
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRealtimeConfig {
    pub phase_timeout: String,
    pub silence_timeout: String,
    pub rate_limit: String,
}

impl Default for FileRealtimeConfig {
    fn default() -> Self {
        Self {
            phase_timeout: "120s".to_string(),
            silence_timeout: "30s".to_string(),
            rate_limit: "0s".to_string(),
        }
    }
}

impl FileRealtimeConfig {
    /// Convert to [`RealtimeSetting`], returning errors for unparsable values.
    ///
    /// A field that fails to parse keeps its built-in default.
    pub fn to_realtime_setting(&self) -> (RealtimeSetting, Vec<ConfigIssue>) {
        let defaults = RealtimeSetting::default();
        let mut issues = Vec::new();
        let setting = RealtimeSetting {
            phase_timeout: parse_field(
                "realtime.phase_timeout",
                &self.phase_timeout,
                defaults.phase_timeout,
                &mut issues,
            ),
            silence_timeout: parse_field(
                "realtime.silence_timeout",
                &self.silence_timeout,
                defaults.silence_timeout,
                &mut issues,
            ),
            rate_limit: parse_field(
                "realtime.rate_limit",
                &self.rate_limit,
                defaults.rate_limit,
                &mut issues,
            ),
        };
        (setting, issues)
    }
}

fn parse_field(
    field: &str,
    value: &str,
    fallback: Duration,
    issues: &mut Vec<ConfigIssue>,
) -> Duration {
    match humantime::parse_duration(value.trim()) {
        Ok(duration) => duration,
        Err(e) => {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidDuration {
                    field: field.to_string(),
                    value: value.to_string(),
                },
                format!("{field}: cannot parse '{value}' as a duration ({e})"),
            ));
            fallback
        }
    }
}
