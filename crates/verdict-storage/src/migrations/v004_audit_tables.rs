//! v004: moderation_audit_log.

use rusqlite::Connection;

use verdict_core::errors::VerdictResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VerdictResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS moderation_audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_type TEXT NOT NULL,
            entity_id   TEXT NOT NULL,
            operation   TEXT NOT NULL,
            actor       TEXT NOT NULL DEFAULT 'system',
            details     TEXT NOT NULL DEFAULT '{}',
            timestamp   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_entity ON moderation_audit_log(entity_id);
        CREATE INDEX IF NOT EXISTS idx_audit_operation ON moderation_audit_log(operation);
        CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON moderation_audit_log(timestamp);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
