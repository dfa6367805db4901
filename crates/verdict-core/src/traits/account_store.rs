use chrono::{DateTime, Utc};

use crate::errors::VerdictResult;
use crate::models::{AccountRecord, BlockTransition, ContentType};

/// Access to the external account store.
pub trait IAccountStore: Send + Sync {
    /// Current owner of a content item, resolved at call time.
    fn owner_of(&self, content_type: ContentType, content_id: &str)
        -> VerdictResult<Option<String>>;

    fn get_account(&self, account_id: &str) -> VerdictResult<Option<AccountRecord>>;

    fn is_blocked(&self, account_id: &str) -> VerdictResult<bool>;

    /// Conditional `is_blocked: false -> true`. Safe to call on a blocked account,
    /// which yields [`BlockTransition::AlreadyBlocked`] and writes nothing.
    fn block_account(
        &self,
        account_id: &str,
        reason: &str,
        blocked_by: &str,
        blocked_at: DateTime<Utc>,
    ) -> VerdictResult<BlockTransition>;
}
