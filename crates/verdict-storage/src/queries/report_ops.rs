//! Insert, get, conditional transition, and listing for content reports.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use verdict_core::errors::{StorageError, VerdictResult};
use verdict_core::models::{ContentReport, ContentType, ReportStatus};

use super::{format_ts, parse_opt_ts, parse_ts};
use crate::to_storage_err;

const TABLE: &str = "content_reports";

const SELECT_COLUMNS: &str = "SELECT id, content_type, content_id, reporter_id, reason, description,
        status, moderated_by, moderated_at, moderation_notes, created_at
 FROM content_reports";

pub fn insert_report(conn: &Connection, report: &ContentReport) -> VerdictResult<()> {
    conn.execute(
        "INSERT INTO content_reports (
            id, content_type, content_id, reporter_id, reason, description,
            status, moderated_by, moderated_at, moderation_notes, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            report.id,
            report.content_type.as_str(),
            report.content_id,
            report.reporter_id,
            report.reason,
            report.description,
            report.status.as_str(),
            report.moderated_by,
            report.moderated_at.as_ref().map(format_ts),
            report.moderation_notes,
            format_ts(&report.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_report: {e}")))?;
    Ok(())
}

pub fn get_report(conn: &Connection, id: &str) -> VerdictResult<Option<ContentReport>> {
    let raw = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            RawReport::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(format!("get_report: {e}")))?;
    raw.map(RawReport::into_report).transpose()
}

/// Close a pending report. Returns the number of rows changed: 1 if this call
/// won the transition, 0 if the report is missing or already terminal.
pub fn close_if_pending(
    conn: &Connection,
    id: &str,
    status: ReportStatus,
    moderated_by: &str,
    moderated_at: &DateTime<Utc>,
    notes: Option<&str>,
) -> VerdictResult<usize> {
    conn.execute(
        "UPDATE content_reports
         SET status = ?2, moderated_by = ?3, moderated_at = ?4, moderation_notes = ?5
         WHERE id = ?1 AND status = 'pending'",
        params![
            id,
            status.as_str(),
            moderated_by,
            format_ts(moderated_at),
            notes
        ],
    )
    .map_err(|e| to_storage_err(format!("close_if_pending: {e}")))
}

pub fn list_by_status(
    conn: &Connection,
    status: ReportStatus,
    limit: usize,
) -> VerdictResult<Vec<ContentReport>> {
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_COLUMNS} WHERE status = ?1 ORDER BY created_at ASC LIMIT ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![status.as_str(), limit as i64], RawReport::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut reports = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        reports.push(raw.into_report()?);
    }
    Ok(reports)
}

/// Column values as stored, before enum and timestamp parsing.
struct RawReport {
    id: String,
    content_type: String,
    content_id: String,
    reporter_id: String,
    reason: String,
    description: Option<String>,
    status: String,
    moderated_by: Option<String>,
    moderated_at: Option<String>,
    moderation_notes: Option<String>,
    created_at: String,
}

impl RawReport {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            content_type: row.get(1)?,
            content_id: row.get(2)?,
            reporter_id: row.get(3)?,
            reason: row.get(4)?,
            description: row.get(5)?,
            status: row.get(6)?,
            moderated_by: row.get(7)?,
            moderated_at: row.get(8)?,
            moderation_notes: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_report(self) -> VerdictResult<ContentReport> {
        let corrupt = |details: String| StorageError::CorruptRow {
            table: TABLE.to_string(),
            details,
        };
        let content_type = self
            .content_type
            .parse::<ContentType>()
            .map_err(|e| corrupt(e.to_string()))?;
        let status = self
            .status
            .parse::<ReportStatus>()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(ContentReport {
            content_type,
            status,
            moderated_at: parse_opt_ts(TABLE, self.moderated_at)?,
            created_at: parse_ts(TABLE, &self.created_at)?,
            id: self.id,
            content_id: self.content_id,
            reporter_id: self.reporter_id,
            reason: self.reason,
            description: self.description,
            moderated_by: self.moderated_by,
            moderation_notes: self.moderation_notes,
        })
    }
}
