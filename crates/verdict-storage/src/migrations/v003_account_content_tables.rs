//! v003: accounts, content_items.

use rusqlite::Connection;

use verdict_core::errors::VerdictResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VerdictResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id             TEXT PRIMARY KEY,
            email          TEXT,
            is_blocked     INTEGER NOT NULL DEFAULT 0,
            blocked_at     TEXT,
            blocked_by     TEXT,
            blocked_reason TEXT
        );

        CREATE TABLE IF NOT EXISTS content_items (
            content_type TEXT NOT NULL CHECK (content_type IN ('melody', 'pack')),
            id           TEXT NOT NULL,
            owner_id     TEXT NOT NULL,
            active       INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (content_type, id)
        );

        CREATE INDEX IF NOT EXISTS idx_content_owner ON content_items(owner_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
