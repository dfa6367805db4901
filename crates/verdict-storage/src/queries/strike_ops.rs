//! Append and windowed count for the strike ledger. No update or delete
//! lives here; the schema rejects both.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use verdict_core::errors::VerdictResult;
use verdict_core::models::Strike;

use super::{format_ts, parse_ts};
use crate::to_storage_err;

const TABLE: &str = "strikes";

pub fn insert_strike(conn: &Connection, strike: &Strike) -> VerdictResult<()> {
    conn.execute(
        "INSERT INTO strikes (id, account_id, reason, report_id, applied_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            strike.id,
            strike.account_id,
            strike.reason,
            strike.report_id,
            strike.applied_by,
            format_ts(&strike.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_strike: {e}")))?;
    Ok(())
}

/// Served by `idx_strikes_account_time`.
pub fn count_since(conn: &Connection, account_id: &str, since: &DateTime<Utc>) -> VerdictResult<u32> {
    conn.query_row(
        "SELECT COUNT(*) FROM strikes WHERE account_id = ?1 AND created_at >= ?2",
        params![account_id, format_ts(since)],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(format!("count_since: {e}")))
}

pub fn by_account(conn: &Connection, account_id: &str) -> VerdictResult<Vec<Strike>> {
    query_strikes(
        conn,
        "SELECT id, account_id, reason, report_id, applied_by, created_at
         FROM strikes WHERE account_id = ?1 ORDER BY created_at ASC",
        account_id,
    )
}

pub fn by_report(conn: &Connection, report_id: &str) -> VerdictResult<Vec<Strike>> {
    query_strikes(
        conn,
        "SELECT id, account_id, reason, report_id, applied_by, created_at
         FROM strikes WHERE report_id = ?1 ORDER BY created_at ASC",
        report_id,
    )
}

fn query_strikes(conn: &Connection, sql: &str, key: &str) -> VerdictResult<Vec<Strike>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![key], raw_strike)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut strikes = Vec::new();
    for row in rows {
        let (id, account_id, reason, report_id, applied_by, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        strikes.push(Strike {
            id,
            account_id,
            reason,
            report_id,
            applied_by,
            created_at: parse_ts(TABLE, &created_at)?,
        });
    }
    Ok(strikes)
}

type RawStrike = (String, String, String, String, String, String);

fn raw_strike(row: &Row<'_>) -> rusqlite::Result<RawStrike> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}
