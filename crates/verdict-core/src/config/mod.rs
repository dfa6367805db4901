pub mod defaults;
mod escalation_config;
mod intake_config;
mod notification_config;
mod storage_config;

pub use escalation_config::EscalationConfig;
pub use intake_config::IntakeConfig;
pub use notification_config::NotificationConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section falls back to its defaults,
/// so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictConfig {
    pub storage: StorageConfig,
    pub escalation: EscalationConfig,
    pub notification: NotificationConfig,
    pub intake: IntakeConfig,
}

impl VerdictConfig {
    /// Parse a TOML document into a config.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
