//! Phase and silence deadlines.

use realtalk_domain::RealtimeSetting;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep_until};
use tracing::warn;

/// Window for discarding residual input after a phase. Not configurable.
pub(super) const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeouts in force for one phase, after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EffectiveTimeouts {
    pub phase: Duration,
    pub silence: Duration,
    pub drain: Duration,
}

impl EffectiveTimeouts {
    /// Replace zero timeouts with the documented defaults, warning for each.
    pub(super) fn resolve(setting: &RealtimeSetting, game_id: &str) -> Self {
        let mut phase = setting.phase_timeout;
        if phase.is_zero() {
            phase = RealtimeSetting::DEFAULT_PHASE_TIMEOUT;
            warn!(game_id, default = ?phase, "phase_timeout is not set; using default");
        }
        let mut silence = setting.silence_timeout;
        if silence.is_zero() {
            silence = RealtimeSetting::DEFAULT_SILENCE_TIMEOUT;
            warn!(game_id, default = ?silence, "silence_timeout is not set; using default");
        }
        Self {
            phase,
            silence,
            drain: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

/// Which deadline fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Expiry {
    Phase,
    Silence,
}

/// The absolute phase deadline and the resettable silence deadline.
pub(super) struct TimeoutManager {
    phase: Pin<Box<Sleep>>,
    silence: Pin<Box<Sleep>>,
    silence_timeout: Duration,
}

impl TimeoutManager {
    /// Arm both deadlines from now.
    pub(super) fn start(timeouts: &EffectiveTimeouts) -> Self {
        let now = Instant::now();
        Self {
            phase: Box::pin(sleep_until(now + timeouts.phase)),
            silence: Box::pin(sleep_until(now + timeouts.silence)),
            silence_timeout: timeouts.silence,
        }
    }

    /// Push the silence deadline out by a full interval from now.
    pub(super) fn reset_silence(&mut self) {
        self.silence
            .as_mut()
            .reset(Instant::now() + self.silence_timeout);
    }

    /// Resolve when either deadline fires. The phase deadline wins ties.
    pub(super) async fn expired(&mut self) -> Expiry {
        tokio::select! {
            biased;
            () = self.phase.as_mut() => Expiry::Phase,
            () = self.silence.as_mut() => Expiry::Silence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeouts_fall_back_to_defaults() {
        let setting = RealtimeSetting {
            phase_timeout: Duration::ZERO,
            silence_timeout: Duration::ZERO,
            rate_limit: Duration::ZERO,
        };
        let timeouts = EffectiveTimeouts::resolve(&setting, "g1");
        assert_eq!(timeouts.phase, Duration::from_secs(120));
        assert_eq!(timeouts.silence, Duration::from_secs(30));
        assert_eq!(timeouts.drain, Duration::from_secs(2));
    }

    #[test]
    fn test_configured_timeouts_are_kept() {
        let setting = RealtimeSetting {
            phase_timeout: Duration::from_secs(10),
            silence_timeout: Duration::from_secs(4),
            rate_limit: Duration::ZERO,
        };
        let timeouts = EffectiveTimeouts::resolve(&setting, "g1");
        assert_eq!(timeouts.phase, Duration::from_secs(10));
        assert_eq!(timeouts.silence, Duration::from_secs(4));
    }

    fn timeouts(phase: u64, silence: u64) -> EffectiveTimeouts {
        EffectiveTimeouts {
            phase: Duration::from_secs(phase),
            silence: Duration::from_secs(silence),
            drain: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_silence_fires_first() {
        let start = Instant::now();
        let mut timers = TimeoutManager::start(&timeouts(10, 3));
        assert_eq!(timers.expired().await, Expiry::Silence);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_silence_defers_expiry() {
        let start = Instant::now();
        let mut timers = TimeoutManager::start(&timeouts(10, 3));
        tokio::time::sleep(Duration::from_secs(2)).await;
        timers.reset_silence();
        assert_eq!(timers.expired().await, Expiry::Silence);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_deadline_is_absolute() {
        let start = Instant::now();
        let mut timers = TimeoutManager::start(&timeouts(4, 3));
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            timers.reset_silence();
        }
        assert_eq!(timers.expired().await, Expiry::Phase);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }
}
