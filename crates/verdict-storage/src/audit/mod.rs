//! Log every moderation mutation: report created/decided, content activation
//! changes, strikes recorded, accounts blocked.

use rusqlite::Connection;

use verdict_core::constants::{
    AUDIT_ENTITY_ACCOUNT, AUDIT_ENTITY_CONTENT, AUDIT_ENTITY_REPORT, AUDIT_ENTITY_STRIKE,
};
use verdict_core::errors::VerdictResult;
use verdict_core::models::{
    timestamp_now, AccountRecord, AuditEntry, AuditOperation, ContentReport, ContentType, Strike,
};

use crate::queries::audit_ops;

/// Append-only audit logger. Always called on the connection that performed
/// the mutation, right after it.
pub struct AuditLogger;

impl AuditLogger {
    pub fn log(
        conn: &Connection,
        entity_type: &str,
        entity_id: &str,
        operation: AuditOperation,
        actor: &str,
        details: serde_json::Value,
    ) -> VerdictResult<()> {
        let entry = AuditEntry {
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            operation,
            actor: actor.to_string(),
            details,
            timestamp: timestamp_now(),
        };
        audit_ops::insert_audit_entry(conn, &entry)
    }

    pub fn log_report_created(conn: &Connection, report: &ContentReport) -> VerdictResult<()> {
        Self::log(
            conn,
            AUDIT_ENTITY_REPORT,
            &report.id,
            AuditOperation::ReportCreated,
            &report.reporter_id,
            serde_json::json!({
                "content_type": report.content_type,
                "content_id": report.content_id,
                "reason": report.reason,
            }),
        )
    }

    pub fn log_report_decided(conn: &Connection, report: &ContentReport) -> VerdictResult<()> {
        Self::log(
            conn,
            AUDIT_ENTITY_REPORT,
            &report.id,
            AuditOperation::ReportDecided,
            report.moderated_by.as_deref().unwrap_or("system"),
            serde_json::json!({ "status": report.status }),
        )
    }

    pub fn log_content_activation(
        conn: &Connection,
        content_type: ContentType,
        content_id: &str,
        active: bool,
        actor: &str,
    ) -> VerdictResult<()> {
        Self::log(
            conn,
            AUDIT_ENTITY_CONTENT,
            content_id,
            AuditOperation::ContentActivationChanged,
            actor,
            serde_json::json!({ "content_type": content_type, "active": active }),
        )
    }

    pub fn log_strike(conn: &Connection, strike: &Strike) -> VerdictResult<()> {
        Self::log(
            conn,
            AUDIT_ENTITY_STRIKE,
            &strike.account_id,
            AuditOperation::StrikeRecorded,
            &strike.applied_by,
            serde_json::json!({ "strike_id": strike.id, "report_id": strike.report_id }),
        )
    }

    pub fn log_account_blocked(conn: &Connection, account: &AccountRecord) -> VerdictResult<()> {
        Self::log(
            conn,
            AUDIT_ENTITY_ACCOUNT,
            &account.id,
            AuditOperation::AccountBlocked,
            account.blocked_by.as_deref().unwrap_or("system"),
            serde_json::json!({ "reason": account.blocked_reason }),
        )
    }
}
