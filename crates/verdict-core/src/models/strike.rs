use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, timestamp_now, ContentType};

/// An append-only enforcement penalty against a content owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strike {
    pub id: String,
    /// The penalized content owner, never the reporter.
    pub account_id: String,
    pub reason: String,
    pub report_id: String,
    pub applied_by: String,
    pub created_at: DateTime<Utc>,
}

impl Strike {
    pub fn new(account_id: &str, reason: String, report_id: &str, applied_by: &str) -> Self {
        Self::at(account_id, reason, report_id, applied_by, timestamp_now())
    }

    /// A strike with an explicit creation time (imports and backdated fixtures).
    pub fn at(
        account_id: &str,
        reason: String,
        report_id: &str,
        applied_by: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            account_id: account_id.to_string(),
            reason,
            report_id: report_id.to_string(),
            applied_by: applied_by.to_string(),
            created_at,
        }
    }

    /// Audit reason derived from the offending content and its report.
    pub fn reason_for(content_type: ContentType, content_id: &str, report_id: &str) -> String {
        format!("{content_type} {content_id} removed after report {report_id}")
    }
}
