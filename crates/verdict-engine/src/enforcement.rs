//! AccountEnforcer: blocks an account once its windowed count crosses the
//! threshold, and notifies only from the request that won the block write.

use std::sync::Arc;

use tracing::{info, warn};

use verdict_core::errors::VerdictResult;
use verdict_core::models::{timestamp_now, BlockNotice, BlockOutcome, BlockTransition};
use verdict_core::traits::IAccountStore;

use crate::escalation::EscalationPolicy;
use crate::notify::NotificationDispatcher;

pub struct AccountEnforcer {
    accounts: Arc<dyn IAccountStore>,
    policy: EscalationPolicy,
    dispatcher: Arc<NotificationDispatcher>,
}

impl AccountEnforcer {
    pub fn new(
        accounts: Arc<dyn IAccountStore>,
        policy: EscalationPolicy,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            accounts,
            policy,
            dispatcher,
        }
    }

    /// Block `account_id` if `windowed_count` warrants it.
    ///
    /// Idempotent: an account that is already blocked is left untouched and
    /// reported as [`BlockOutcome::AlreadyBlocked`]. Never unblocks.
    pub fn block_if_needed(
        &self,
        account_id: &str,
        windowed_count: u32,
        blocked_by: &str,
    ) -> VerdictResult<BlockOutcome> {
        let _span = crate::enforcement_span!(account_id, windowed_count).entered();

        if !self.policy.should_block(windowed_count) {
            return Ok(BlockOutcome::NotBlocked);
        }
        if self.accounts.is_blocked(account_id)? {
            return Ok(BlockOutcome::AlreadyBlocked);
        }

        let reason = self.policy.block_reason(windowed_count);
        let account = match self.accounts.block_account(
            account_id,
            &reason,
            blocked_by,
            timestamp_now(),
        )? {
            BlockTransition::Blocked(account) => account,
            // Lost the race to a concurrent block; the winner notifies.
            BlockTransition::AlreadyBlocked => return Ok(BlockOutcome::AlreadyBlocked),
        };
        info!(blocked_by, "account blocked");

        let blocked_at = account.blocked_at.unwrap_or_else(timestamp_now);
        match account.email {
            Some(address) => self.dispatcher.dispatch(BlockNotice {
                account_id: account.id,
                address,
                reason,
                strike_count: windowed_count,
            }),
            None => warn!("blocked account has no contact address; notice skipped"),
        }
        Ok(BlockOutcome::NewlyBlocked { blocked_at })
    }
}
