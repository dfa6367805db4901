use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry in the append-only moderation audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub entity_type: String,
    pub entity_id: String,
    pub operation: AuditOperation,
    /// Account id of the actor, or `system`.
    pub actor: String,
    /// JSON details about the operation.
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Operations tracked in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    ReportCreated,
    ReportDecided,
    ContentActivationChanged,
    StrikeRecorded,
    AccountBlocked,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReportCreated => "report_created",
            Self::ReportDecided => "report_decided",
            Self::ContentActivationChanged => "content_activation_changed",
            Self::StrikeRecorded => "strike_recorded",
            Self::AccountBlocked => "account_blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "report_created" => Some(Self::ReportCreated),
            "report_decided" => Some(Self::ReportDecided),
            "content_activation_changed" => Some(Self::ContentActivationChanged),
            "strike_recorded" => Some(Self::StrikeRecorded),
            "account_blocked" => Some(Self::AccountBlocked),
            _ => None,
        }
    }
}
