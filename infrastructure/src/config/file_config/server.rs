//! Server configuration from TOML (`[server]` section)

use realtalk_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// bind = "127.0.0.1:8080"
/// agents = 5
/// days = 2
/// game_id = "practice-01"   # generated from the start time when omitted
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address the agent listener binds to
    pub bind: String,
    /// Number of agents to wait for before the game starts
    pub agents: usize,
    /// Number of days to play
    pub days: u32,
    /// Fixed game id
    pub game_id: Option<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            agents: 5,
            days: 1,
            game_id: None,
        }
    }
}

impl FileServerConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.agents < 2 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "server.agents".to_string(),
                    value: self.agents as u64,
                    min: 2,
                },
                format!(
                    "server.agents: a real-time phase needs at least 2 agents, got {}",
                    self.agents
                ),
            ));
        }
        if self.days == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "server.days".to_string(),
                    value: 0,
                    min: 1,
                },
                "server.days: must be at least 1",
            ));
        }
        issues
    }
}
