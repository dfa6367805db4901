use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, timestamp_now, ContentType};
use crate::errors::VerdictError;

/// Lifecycle state of a report. `Pending` is initial; the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        *self == Self::Pending && next.is_terminal()
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(VerdictError::validation(
                "status",
                format!("unknown report status `{other}`"),
            )),
        }
    }
}

/// A user-submitted flag against a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    pub id: String,
    pub content_type: ContentType,
    pub content_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub moderated_by: Option<String>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub moderation_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContentReport {
    /// Build a fresh pending report from validated intake fields.
    pub fn pending(new: NewReport) -> Self {
        Self {
            id: new_id(),
            content_type: new.content_type,
            content_id: new.content_id,
            reporter_id: new.reporter_id,
            reason: new.reason,
            description: new.description,
            status: ReportStatus::Pending,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            created_at: timestamp_now(),
        }
    }
}

/// Intake payload for a new report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub content_type: ContentType,
    pub content_id: String,
    pub reporter_id: String,
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of the conditional `pending -> terminal` write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTransition {
    /// This caller flipped the status; carries the updated report.
    Applied(ContentReport),
    /// The report was already terminal; carries it unchanged.
    AlreadyClosed(ContentReport),
    Missing,
}
