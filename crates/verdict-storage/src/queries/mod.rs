//! Query functions, one module per table. All take a borrowed connection so
//! the engine decides which connection (writer or reader) runs them.

pub mod account_ops;
pub mod audit_ops;
pub mod content_ops;
pub mod report_ops;
pub mod strike_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use verdict_core::errors::{StorageError, VerdictResult};

/// Fixed-width RFC3339 so lexical order in SQLite matches chronological order.
pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(table: &str, raw: &str) -> VerdictResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp `{raw}`: {e}"),
            }
            .into()
        })
}

pub(crate) fn parse_opt_ts(table: &str, raw: Option<String>) -> VerdictResult<Option<DateTime<Utc>>> {
    raw.map(|s| parse_ts(table, &s)).transpose()
}
