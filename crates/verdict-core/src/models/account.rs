use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of an account the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: String,
    /// Contact address used for block notices.
    pub email: Option<String>,
    pub is_blocked: bool,
    pub blocked_at: Option<DateTime<Utc>>,
    pub blocked_by: Option<String>,
    pub blocked_reason: Option<String>,
}

impl AccountRecord {
    pub fn new(id: &str, email: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            email: email.map(str::to_string),
            is_blocked: false,
            blocked_at: None,
            blocked_by: None,
            blocked_reason: None,
        }
    }
}

/// Result of the conditional `is_blocked: false -> true` write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTransition {
    /// This caller won the write; carries the blocked account.
    Blocked(AccountRecord),
    AlreadyBlocked,
}

/// What `block_if_needed` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum BlockOutcome {
    /// Below threshold; nothing written.
    NotBlocked,
    /// Threshold reached but the account was blocked earlier.
    AlreadyBlocked,
    NewlyBlocked { blocked_at: DateTime<Utc> },
}

impl BlockOutcome {
    pub fn is_newly_blocked(&self) -> bool {
        matches!(self, Self::NewlyBlocked { .. })
    }
}

/// Payload handed to the notifier after a fresh block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNotice {
    pub account_id: String,
    pub address: String,
    pub reason: String,
    pub strike_count: u32,
}
