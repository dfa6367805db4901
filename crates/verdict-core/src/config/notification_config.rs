use serde::{Deserialize, Serialize};

use super::defaults;

/// Block notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Email dispatch endpoint. `None` logs notices instead of sending them.
    pub webhook_url: Option<String>,
    /// Request timeout for the dispatch endpoint (milliseconds).
    pub timeout_ms: u64,
    /// Subject line for block notices.
    pub subject: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_ms: defaults::DEFAULT_NOTIFY_TIMEOUT_MS,
            subject: defaults::DEFAULT_NOTIFY_SUBJECT.to_string(),
        }
    }
}
