//! Insert and query for the moderation audit log.

use rusqlite::{params, Connection};

use verdict_core::errors::{StorageError, VerdictResult};
use verdict_core::models::{AuditEntry, AuditOperation};

use super::{format_ts, parse_ts};
use crate::to_storage_err;

const TABLE: &str = "moderation_audit_log";

pub fn insert_audit_entry(conn: &Connection, entry: &AuditEntry) -> VerdictResult<()> {
    conn.execute(
        "INSERT INTO moderation_audit_log (entity_type, entity_id, operation, actor, details, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.entity_type,
            entry.entity_id,
            entry.operation.as_str(),
            entry.actor,
            entry.details.to_string(),
            format_ts(&entry.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_audit_entry: {e}")))?;
    Ok(())
}

/// All entries for an entity, in insertion order.
pub fn query_by_entity(conn: &Connection, entity_id: &str) -> VerdictResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT entity_type, entity_id, operation, actor, details, timestamp
             FROM moderation_audit_log WHERE entity_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (entity_type, entity_id, operation, actor, details, timestamp) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let operation =
            AuditOperation::parse(&operation).ok_or_else(|| StorageError::CorruptRow {
                table: TABLE.to_string(),
                details: format!("unknown operation `{operation}`"),
            })?;
        entries.push(AuditEntry {
            entity_type,
            entity_id,
            operation,
            actor,
            details: serde_json::from_str(&details)?,
            timestamp: parse_ts(TABLE, &timestamp)?,
        });
    }
    Ok(entries)
}
