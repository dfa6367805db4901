use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{VerdictError, VerdictResult};

/// Strike escalation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Windowed strike count at which an account is blocked.
    pub strike_threshold: u32,
    /// Length of the rolling strike window in days, at most
    /// `MAX_STRIKE_WINDOW_DAYS`.
    pub window_days: i64,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            strike_threshold: defaults::DEFAULT_STRIKE_THRESHOLD,
            window_days: defaults::DEFAULT_STRIKE_WINDOW_DAYS,
        }
    }
}

impl EscalationConfig {
    pub fn validate(&self) -> VerdictResult<()> {
        if self.strike_threshold == 0 {
            return Err(VerdictError::ConfigError(
                "escalation.strike_threshold must be at least 1".to_string(),
            ));
        }
        if self.window_days <= 0 {
            return Err(VerdictError::ConfigError(
                "escalation.window_days must be positive".to_string(),
            ));
        }
        if self.window_days > defaults::MAX_STRIKE_WINDOW_DAYS {
            return Err(VerdictError::ConfigError(format!(
                "escalation.window_days must be at most {}",
                defaults::MAX_STRIKE_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}
