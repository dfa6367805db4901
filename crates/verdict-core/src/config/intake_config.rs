use serde::{Deserialize, Serialize};

use super::defaults;

/// Report intake limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum length of the report reason, in characters.
    pub max_reason_len: usize,
    /// Maximum length of the free-text description, in characters.
    pub max_description_len: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_reason_len: defaults::DEFAULT_MAX_REASON_LEN,
            max_description_len: defaults::DEFAULT_MAX_DESCRIPTION_LEN,
        }
    }
}
