use crate::errors::VerdictResult;
use crate::models::BlockNotice;

/// Outbound block notifications (email). Called off the request path.
pub trait INotifier: Send + Sync {
    fn notify_blocked(&self, notice: &BlockNotice) -> VerdictResult<()>;
}
