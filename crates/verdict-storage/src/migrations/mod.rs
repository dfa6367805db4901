//! Versioned schema migrations. Each version runs in its own transaction and
//! is recorded in `schema_version`; already-applied versions are skipped.

mod v001_report_tables;
mod v002_strike_tables;
mod v003_account_content_tables;
mod v004_audit_tables;

use rusqlite::{params, Connection};
use tracing::info;

use verdict_core::errors::{StorageError, VerdictResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> VerdictResult<()>;

const MIGRATIONS: [(u32, Migration); 4] = [
    (1, v001_report_tables::migrate),
    (2, v002_strike_tables::migrate),
    (3, v003_account_content_tables::migrate),
    (4, v004_audit_tables::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 4;

/// Bring the database up to [`LATEST_VERSION`].
pub fn run_migrations(conn: &Connection) -> VerdictResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        apply(conn, *version, *migrate)?;
        info!(version, "applied schema migration");
    }
    current_version(conn)
}

/// Highest applied version, or 0 on a fresh database.
pub fn current_version(conn: &Connection) -> VerdictResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn apply(conn: &Connection, version: u32, migrate: Migration) -> VerdictResult<()> {
    let failed = |reason: String| StorageError::MigrationFailed { version, reason };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| failed(e.to_string()))?;
    migrate(&tx).map_err(|e| failed(e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        params![version],
    )
    .map_err(|e| failed(e.to_string()))?;
    tx.commit().map_err(|e| failed(e.to_string()))?;
    Ok(())
}
