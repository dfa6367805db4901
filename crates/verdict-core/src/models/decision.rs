use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ContentReport, ContentType, ReportStatus, Strike};
use crate::errors::VerdictError;

/// A moderator's verdict on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    /// The report is unfounded; content stays up.
    Approve,
    /// The report is upheld; content comes down.
    Reject,
}

impl ModerationAction {
    pub fn target_status(&self) -> ReportStatus {
        match self {
            Self::Approve => ReportStatus::Approved,
            Self::Reject => ReportStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationAction {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(VerdictError::validation(
                "action",
                format!("unknown action `{other}`"),
            )),
        }
    }
}

/// Caller identity as established by the authorization layer.
/// The engine trusts `is_moderator`; it never authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorContext {
    pub account_id: String,
    pub is_moderator: bool,
}

impl ModeratorContext {
    pub fn moderator(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            is_moderator: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub report_id: String,
    pub moderator: ModeratorContext,
    pub action: ModerationAction,
    /// Only meaningful with [`ModerationAction::Reject`].
    pub apply_strike: bool,
    pub notes: Option<String>,
}

/// An effect that failed after the report status had already committed.
/// Each one names what an operator has to re-run out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum PartialFailure {
    ContentDeactivation {
        content_type: ContentType,
        content_id: String,
        error: String,
    },
    OwnerResolution {
        content_type: ContentType,
        content_id: String,
        error: String,
    },
    StrikeRecording { account_id: String, error: String },
    AccountBlock { account_id: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub report: ContentReport,
    pub status: ReportStatus,
    pub content_deactivated: bool,
    pub strike: Option<Strike>,
    pub strike_recorded: bool,
    pub strike_count: Option<u32>,
    pub account_blocked: bool,
    pub failures: Vec<PartialFailure>,
}

impl DecisionResult {
    /// A result for a report whose status just committed, before any other effect.
    pub fn closed(report: ContentReport) -> Self {
        Self {
            status: report.status,
            report,
            content_deactivated: false,
            strike: None,
            strike_recorded: false,
            strike_count: None,
            account_blocked: false,
            failures: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
