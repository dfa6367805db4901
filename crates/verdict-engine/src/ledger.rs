//! StrikeLedger: appends strikes and derives the rolling-window count.
//!
//! The count is a fresh range query on every call, never a stored counter.
//! It runs after the append commits, so of two strikes racing on one account
//! the later always counts both. Both may cross the threshold; the block write
//! is conditional, so only one of them blocks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use verdict_core::errors::VerdictResult;
use verdict_core::models::{timestamp_now, ContentReport, Strike};
use verdict_core::traits::IStrikeLedger;

use crate::escalation::EscalationPolicy;

pub struct StrikeLedger {
    store: Arc<dyn IStrikeLedger>,
    policy: EscalationPolicy,
}

impl StrikeLedger {
    pub fn new(store: Arc<dyn IStrikeLedger>, policy: EscalationPolicy) -> Self {
        Self { store, policy }
    }

    /// Append a strike against `account_id` for `report` and return it with
    /// the windowed count, which includes the new strike.
    ///
    /// No dedup: callers must record at most one strike per report.
    #[instrument(skip(self, report), fields(report_id = %report.id))]
    pub fn record_strike(
        &self,
        account_id: &str,
        report: &ContentReport,
        applied_by: &str,
    ) -> VerdictResult<(Strike, u32)> {
        let strike = Strike::new(
            account_id,
            Strike::reason_for(report.content_type, &report.content_id, &report.id),
            &report.id,
            applied_by,
        );
        self.store.append_strike(&strike)?;

        let count = self.windowed_count_at(account_id, strike.created_at)?;
        debug!(strike_id = %strike.id, windowed_count = count, "strike recorded");
        Ok((strike, count))
    }

    /// Strikes inside the window ending now.
    pub fn windowed_count(&self, account_id: &str) -> VerdictResult<u32> {
        self.windowed_count_at(account_id, timestamp_now())
    }

    pub fn windowed_count_at(&self, account_id: &str, now: DateTime<Utc>) -> VerdictResult<u32> {
        self.store
            .count_strikes_since(account_id, self.policy.window_start(now)?)
    }

    pub fn history(&self, account_id: &str) -> VerdictResult<Vec<Strike>> {
        self.store.strikes_for_account(account_id)
    }

    pub fn strikes_for_report(&self, report_id: &str) -> VerdictResult<Vec<Strike>> {
        self.store.strikes_for_report(report_id)
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }
}
