use chrono::{DateTime, Utc};

use crate::errors::VerdictResult;
use crate::models::Strike;

/// Append-only strike storage. Counts are always derived from rows.
pub trait IStrikeLedger: Send + Sync {
    /// Append unconditionally. Callers guarantee at most one strike per report.
    fn append_strike(&self, strike: &Strike) -> VerdictResult<()>;

    /// Strikes for `account_id` with `created_at >= since`.
    fn count_strikes_since(&self, account_id: &str, since: DateTime<Utc>) -> VerdictResult<u32>;

    fn strikes_for_account(&self, account_id: &str) -> VerdictResult<Vec<Strike>>;
    fn strikes_for_report(&self, report_id: &str) -> VerdictResult<Vec<Strike>>;
}
