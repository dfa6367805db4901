use crate::errors::VerdictResult;
use crate::models::ContentType;

/// Access to the external content store.
pub trait IContentGateway: Send + Sync {
    fn content_exists(&self, content_type: ContentType, content_id: &str) -> VerdictResult<bool>;

    fn set_content_active(
        &self,
        content_type: ContentType,
        content_id: &str,
        active: bool,
        actor: &str,
    ) -> VerdictResult<()>;
}
