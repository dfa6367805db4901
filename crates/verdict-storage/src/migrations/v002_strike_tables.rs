//! v002: strikes. Append-only: triggers abort any UPDATE or DELETE.

use rusqlite::Connection;

use verdict_core::errors::VerdictResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VerdictResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS strikes (
            id          TEXT PRIMARY KEY,
            account_id  TEXT NOT NULL,
            reason      TEXT NOT NULL,
            report_id   TEXT NOT NULL,
            applied_by  TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_strikes_account_time ON strikes(account_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_strikes_report ON strikes(report_id);

        CREATE TRIGGER IF NOT EXISTS strikes_no_update
        BEFORE UPDATE ON strikes
        BEGIN
            SELECT RAISE(ABORT, 'strikes are append-only');
        END;

        CREATE TRIGGER IF NOT EXISTS strikes_no_delete
        BEFORE DELETE ON strikes
        BEGIN
            SELECT RAISE(ABORT, 'strikes are append-only');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
