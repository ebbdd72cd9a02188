//! Stream quota configuration from TOML (`[talk]` and `[whisper]` sections)

use realtalk_domain::{
    ConfigIssue, ConfigIssueCode, MaxCount, MaxLength, ParticipantId, TalkSetting,
};
use serde::{Deserialize, Serialize};

/// Raw quota configuration for one stream
///
/// # Example
///
/// ```toml
/// [talk]
/// max_count_per_agent = 5
/// max_count_per_day = 20   # 0 = unlimited
/// max_length = 125         # characters; 0 = unlimited
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTalkConfig {
    pub max_count_per_agent: usize,
    pub max_count_per_day: usize,
    pub max_length: usize,
}

impl Default for FileTalkConfig {
    fn default() -> Self {
        let max_count = MaxCount::default();
        Self {
            max_count_per_agent: max_count.per_agent,
            max_count_per_day: max_count.per_day,
            max_length: 0,
        }
    }
}

impl FileTalkConfig {
    pub fn to_talk_setting(&self) -> TalkSetting {
        TalkSetting {
            max_count: MaxCount {
                per_agent: self.max_count_per_agent,
                per_day: self.max_count_per_day,
            },
            max_length: MaxLength::per_talk(self.max_length),
        }
    }

    pub(super) fn validate(&self, section: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_count_per_day > 0 && self.max_count_per_day < self.max_count_per_agent {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::DailyQuotaBelowAgentQuota {
                    section: section.to_string(),
                },
                format!(
                    "{section}.max_count_per_day ({}) is below max_count_per_agent ({}); \
                     no agent can use its full quota",
                    self.max_count_per_day, self.max_count_per_agent
                ),
            ));
        }
        issues
    }
}

/// Raw whisper configuration: quotas plus the whisper group
///
/// # Example
///
/// ```toml
/// [whisper]
/// group = [1, 3]           # seats taking part; empty disables whispering
/// max_count_per_agent = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWhisperConfig {
    /// 1-based seat numbers
    pub group: Vec<usize>,
    #[serde(flatten)]
    pub quota: FileTalkConfig,
}

impl FileWhisperConfig {
    pub fn group_ids(&self) -> Vec<ParticipantId> {
        self.group.iter().copied().map(ParticipantId::new).collect()
    }

    pub(super) fn validate(&self, agents: usize) -> Vec<ConfigIssue> {
        let mut issues = self.quota.validate("whisper");
        for &seat in &self.group {
            if seat == 0 || seat > agents {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownSeat { seat },
                    format!("whisper.group: seat {seat} does not exist (agents = {agents})"),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_means_unlimited() {
        let setting = FileTalkConfig::default().to_talk_setting();
        assert_eq!(setting.max_length.limit(), None);
        assert_eq!(setting.max_count, MaxCount::default());
    }

    #[test]
    fn test_daily_quota_below_agent_quota_warns() {
        let config = FileTalkConfig {
            max_count_per_agent: 5,
            max_count_per_day: 3,
            max_length: 0,
        };
        let issues = config.validate("talk");
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());

        let unlimited = FileTalkConfig {
            max_count_per_day: 0,
            ..config
        };
        assert!(unlimited.validate("talk").is_empty());
    }

    #[test]
    fn test_unknown_whisper_seat_is_an_error() {
        let config = FileWhisperConfig {
            group: vec![1, 6],
            quota: FileTalkConfig::default(),
        };
        let issues = config.validate(5);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownSeat { seat: 6 });
    }
}
