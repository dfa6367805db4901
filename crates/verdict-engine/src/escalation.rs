//! Escalation policy: a pure decision on a fresh windowed strike count.

use chrono::{DateTime, TimeDelta, Utc};

use verdict_core::config::EscalationConfig;
use verdict_core::errors::{VerdictError, VerdictResult};

/// Threshold and window length, read once from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPolicy {
    threshold: u32,
    window_days: i64,
}

impl EscalationPolicy {
    pub fn new(config: &EscalationConfig) -> VerdictResult<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.strike_threshold,
            window_days: config.window_days,
        })
    }

    /// True once the windowed count reaches the threshold.
    pub fn should_block(&self, windowed_count: u32) -> bool {
        windowed_count >= self.threshold
    }

    /// Inclusive lower bound of the rolling window ending at `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> VerdictResult<DateTime<Utc>> {
        TimeDelta::try_days(self.window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                VerdictError::ConfigError(format!(
                    "strike window of {} days before {now} is out of range",
                    self.window_days
                ))
            })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Reason stored on the account and sent in the notice.
    pub fn block_reason(&self, windowed_count: u32) -> String {
        format!(
            "{windowed_count} strikes within {} days (limit {})",
            self.window_days, self.threshold
        )
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        let config = EscalationConfig::default();
        Self {
            threshold: config.strike_threshold,
            window_days: config.window_days,
        }
    }
}
