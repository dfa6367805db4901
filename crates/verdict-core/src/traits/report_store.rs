use chrono::{DateTime, Utc};

use crate::errors::VerdictResult;
use crate::models::{ContentReport, ReportStatus, ReportTransition};

/// Durable mapping from report id to report state.
pub trait IReportStore: Send + Sync {
    fn insert_report(&self, report: &ContentReport) -> VerdictResult<()>;
    fn get_report(&self, id: &str) -> VerdictResult<Option<ContentReport>>;

    /// Single-row conditional update: applies only while the report is pending.
    /// This is the linearization point for concurrent decisions.
    fn transition_report(
        &self,
        id: &str,
        status: ReportStatus,
        moderated_by: &str,
        moderated_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> VerdictResult<ReportTransition>;

    /// Reports in `status`, oldest first.
    fn list_reports(&self, status: ReportStatus, limit: usize) -> VerdictResult<Vec<ContentReport>>;
}
