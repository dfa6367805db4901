mod account;
mod audit_entry;
mod content;
mod decision;
mod report;
mod strike;

pub use account::{AccountRecord, BlockNotice, BlockOutcome, BlockTransition};
pub use audit_entry::{AuditEntry, AuditOperation};
pub use content::{ContentItem, ContentType};
pub use decision::{
    DecisionRequest, DecisionResult, ModerationAction, ModeratorContext, PartialFailure,
};
pub use report::{ContentReport, NewReport, ReportStatus, ReportTransition};
pub use strike::Strike;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to microseconds, the precision timestamps are persisted at.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Generate a new opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
