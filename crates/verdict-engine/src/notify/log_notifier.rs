use tracing::info;

use verdict_core::errors::VerdictResult;
use verdict_core::models::BlockNotice;
use verdict_core::traits::INotifier;

/// Writes notices to the log instead of sending them. Used when no
/// dispatch endpoint is configured.
pub struct LogNotifier;

impl INotifier for LogNotifier {
    fn notify_blocked(&self, notice: &BlockNotice) -> VerdictResult<()> {
        info!(
            account_id = %notice.account_id,
            address = %notice.address,
            strike_count = notice.strike_count,
            reason = %notice.reason,
            "account blocked (notice logged, no dispatch endpoint configured)"
        );
        Ok(())
    }
}
