//! The account mirror: lookup and the conditional block transition.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use verdict_core::errors::VerdictResult;
use verdict_core::models::AccountRecord;

use super::{format_ts, parse_opt_ts};
use crate::to_storage_err;

const TABLE: &str = "accounts";

pub fn upsert_account(conn: &Connection, account: &AccountRecord) -> VerdictResult<()> {
    conn.execute(
        "INSERT INTO accounts (id, email, is_blocked, blocked_at, blocked_by, blocked_reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (id) DO UPDATE SET email = excluded.email",
        params![
            account.id,
            account.email,
            account.is_blocked as i32,
            account.blocked_at.as_ref().map(format_ts),
            account.blocked_by,
            account.blocked_reason,
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert_account: {e}")))?;
    Ok(())
}

pub fn get_account(conn: &Connection, id: &str) -> VerdictResult<Option<AccountRecord>> {
    let raw = conn
        .query_row(
            "SELECT id, email, is_blocked, blocked_at, blocked_by, blocked_reason
             FROM accounts WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(format!("get_account: {e}")))?;

    match raw {
        Some((id, email, is_blocked, blocked_at, blocked_by, blocked_reason)) => {
            Ok(Some(AccountRecord {
                id,
                email,
                is_blocked: is_blocked != 0,
                blocked_at: parse_opt_ts(TABLE, blocked_at)?,
                blocked_by,
                blocked_reason,
            }))
        }
        None => Ok(None),
    }
}

/// Flip `is_blocked` only if it is currently false. Returns rows changed:
/// 1 for the caller that won, 0 if already blocked or missing.
pub fn block_if_unblocked(
    conn: &Connection,
    id: &str,
    reason: &str,
    blocked_by: &str,
    blocked_at: &DateTime<Utc>,
) -> VerdictResult<usize> {
    conn.execute(
        "UPDATE accounts
         SET is_blocked = 1, blocked_at = ?2, blocked_by = ?3, blocked_reason = ?4
         WHERE id = ?1 AND is_blocked = 0",
        params![id, format_ts(blocked_at), blocked_by, reason],
    )
    .map_err(|e| to_storage_err(format!("block_if_unblocked: {e}")))
}
