//! Run Session use case
//!
//! Plays a fixed number of days over one set of connected agents. Each day
//! has a public talk phase among every healthy agent, followed by a whisper
//! phase among the whisper group when one is configured.

use crate::agent::ConnectedAgent;
use crate::config::SessionConfig;
use crate::ports::progress::{NoSessionProgress, SessionProgressNotifier};
use crate::use_cases::run_realtime_phase::{
    PhaseReport, RunRealtimePhaseInput, RunRealtimePhaseUseCase,
};
use realtalk_domain::{DomainError, GameState, PhaseKind, Talk};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while running a session
#[derive(Error, Debug)]
pub enum RunSessionError {
    #[error("No agents connected")]
    NoAgents,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    pub game_id: String,
    pub agents: Vec<ConnectedAgent>,
    pub config: SessionConfig,
}

impl RunSessionInput {
    pub fn new(
        game_id: impl Into<String>,
        agents: Vec<ConnectedAgent>,
        config: SessionConfig,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            agents,
            config,
        }
    }
}

/// Everything one day produced.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub day: u32,
    pub talk: PhaseReport,
    pub whisper: Option<PhaseReport>,
    pub talks: Vec<Talk>,
    pub whispers: Vec<Talk>,
}

/// Result of a whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub game_id: String,
    pub days: Vec<DayReport>,
    /// Agents whose connection failed at some point
    pub errored: Vec<String>,
}

/// Use case for running a multi-day session
pub struct RunSessionUseCase {
    phase: RunRealtimePhaseUseCase,
}

impl RunSessionUseCase {
    pub fn new(phase: RunRealtimePhaseUseCase) -> Self {
        Self { phase }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunSessionInput) -> Result<SessionOutcome, RunSessionError> {
        self.execute_with_progress(input, &NoSessionProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSessionInput,
        progress: &dyn SessionProgressNotifier,
    ) -> Result<SessionOutcome, RunSessionError> {
        let RunSessionInput {
            game_id,
            agents,
            config,
        } = input;
        if agents.is_empty() {
            return Err(RunSessionError::NoAgents);
        }

        info!(
            game_id = %game_id,
            agents = agents.len(),
            days = config.days,
            "Starting session"
        );

        let mut game = GameState::new(game_id.clone());
        let mut days = Vec::with_capacity(config.days as usize);

        for day in 1..=config.days {
            game.start_day(day)?;
            progress.on_day_start(day);

            let talk = self
                .run_phase(&mut game, PhaseKind::Talk, healthy(&agents, None), &config, progress)
                .await;

            let whisper = if config.whisper_group.is_empty() {
                None
            } else {
                let group = healthy(&agents, Some(&config.whisper_group));
                Some(
                    self.run_phase(&mut game, PhaseKind::Whisper, group, &config, progress)
                        .await,
                )
            };

            days.push(DayReport {
                day,
                talk,
                whisper,
                talks: game.history(PhaseKind::Talk).entries().to_vec(),
                whispers: game.history(PhaseKind::Whisper).entries().to_vec(),
            });
        }

        let errored: Vec<String> = agents
            .iter()
            .filter(|a| a.has_error())
            .map(|a| a.name().to_string())
            .collect();
        if !errored.is_empty() {
            warn!(game_id = %game_id, errored = ?errored, "Some agents lost their connection");
        }
        info!(game_id = %game_id, "Session finished");

        Ok(SessionOutcome {
            game_id,
            days,
            errored,
        })
    }

    async fn run_phase(
        &self,
        game: &mut GameState,
        kind: PhaseKind,
        agents: Vec<ConnectedAgent>,
        config: &SessionConfig,
        progress: &dyn SessionProgressNotifier,
    ) -> PhaseReport {
        let day = game.day();
        progress.on_phase_start(day, kind, agents.len());
        let input = RunRealtimePhaseInput::new(kind, agents, config.phase_settings(kind));
        let report = self.phase.execute(game, input).await;
        let appended = game.history(kind).since(report.first_idx);
        progress.on_phase_complete(day, &report, appended);
        report
    }
}

/// Agents without a connection error, optionally restricted to `group`.
fn healthy(
    agents: &[ConnectedAgent],
    group: Option<&[realtalk_domain::ParticipantId]>,
) -> Vec<ConnectedAgent> {
    agents
        .iter()
        .filter(|a| !a.has_error())
        .filter(|a| group.is_none_or(|g| g.contains(&a.id())))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scripted_agents;
    use realtalk_domain::{EndReason, ParticipantId, RealtimeSetting};
    use std::sync::Mutex;
    use std::time::Duration;

    fn fast_config(days: u32) -> SessionConfig {
        SessionConfig::default()
            .with_days(days)
            .with_realtime(RealtimeSetting {
                phase_timeout: Duration::from_secs(10),
                silence_timeout: Duration::from_secs(2),
                rate_limit: Duration::ZERO,
            })
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl SessionProgressNotifier for RecordingProgress {
        fn on_day_start(&self, day: u32) {
            self.events.lock().unwrap().push(format!("day {day}"));
        }

        fn on_phase_start(&self, _day: u32, kind: PhaseKind, agents: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{kind} start {agents}"));
        }

        fn on_phase_complete(&self, _day: u32, report: &PhaseReport, appended: &[Talk]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{} done {}", report.kind, appended.len()));
        }
    }

    #[tokio::test]
    async fn test_no_agents_is_an_error() {
        let result = RunSessionUseCase::new(RunRealtimePhaseUseCase::new())
            .execute(RunSessionInput::new("g", Vec::new(), SessionConfig::default()))
            .await;
        assert!(matches!(result, Err(RunSessionError::NoAgents)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_day_starts_with_fresh_history() {
        let (agents, conns) = scripted_agents(2);
        conns[0].push("day one");

        let outcome = RunSessionUseCase::new(RunRealtimePhaseUseCase::new())
            .execute(RunSessionInput::new("g", agents, fast_config(2)))
            .await
            .unwrap();

        assert_eq!(outcome.days.len(), 2);
        assert_eq!(outcome.days[0].talks.len(), 1);
        assert_eq!(outcome.days[0].talk.end_reason, EndReason::SilenceTimeout);
        assert!(outcome.days[1].talks.is_empty());
        assert!(outcome.days[1].whisper.is_none());
        assert!(outcome.errored.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whisper_phase_runs_among_group_only() {
        let (agents, conns) = scripted_agents(3);
        conns[0].push_after(Duration::from_secs(3), "secret");
        conns[2].push_after(Duration::from_secs(3), "public?");

        let config =
            fast_config(1).with_whisper_group(vec![ParticipantId::new(1), ParticipantId::new(2)]);
        let progress = RecordingProgress::default();
        let outcome = RunSessionUseCase::new(RunRealtimePhaseUseCase::new())
            .execute_with_progress(RunSessionInput::new("g", agents, config), &progress)
            .await
            .unwrap();

        let day = &outcome.days[0];
        let whisper = day.whisper.as_ref().unwrap();
        assert_eq!(whisper.kind, PhaseKind::Whisper);
        assert_eq!(day.whispers.len(), 1);
        assert_eq!(day.whispers[0].text, "secret");
        assert!(day.talks.is_empty());
        assert!(
            conns[2]
                .sent()
                .iter()
                .all(|p| p.request.kind() == PhaseKind::Talk)
        );
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "day 1",
                "talk start 3",
                "talk done 0",
                "whisper start 2",
                "whisper done 1"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_errored_agents_are_left_out_of_later_days() {
        let (agents, conns) = scripted_agents(3);
        conns[2].fail_after(Duration::from_millis(100));

        let outcome = RunSessionUseCase::new(RunRealtimePhaseUseCase::new())
            .execute(RunSessionInput::new("g", agents, fast_config(2)))
            .await
            .unwrap();

        assert_eq!(outcome.errored, vec!["Agent[03]".to_string()]);
        let day_two_starts = conns[2]
            .sent_requests()
            .iter()
            .filter(|r| **r == realtalk_domain::Request::TalkStart)
            .count();
        assert_eq!(day_two_starts, 1);
    }
}
