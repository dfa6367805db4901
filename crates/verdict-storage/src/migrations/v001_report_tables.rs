//! v001: content_reports.

use rusqlite::Connection;

use verdict_core::errors::VerdictResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VerdictResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS content_reports (
            id               TEXT PRIMARY KEY,
            content_type     TEXT NOT NULL CHECK (content_type IN ('melody', 'pack')),
            content_id       TEXT NOT NULL,
            reporter_id      TEXT NOT NULL,
            reason           TEXT NOT NULL,
            description      TEXT,
            status           TEXT NOT NULL DEFAULT 'pending'
                             CHECK (status IN ('pending', 'approved', 'rejected')),
            moderated_by     TEXT,
            moderated_at     TEXT,
            moderation_notes TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reports_status ON content_reports(status, created_at);
        CREATE INDEX IF NOT EXISTS idx_reports_content ON content_reports(content_type, content_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
