/// Verdict system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on rows returned by a single report listing.
pub const MAX_REPORT_LIST_LIMIT: usize = 500;

/// Audit entity names.
pub const AUDIT_ENTITY_REPORT: &str = "report";
pub const AUDIT_ENTITY_CONTENT: &str = "content";
pub const AUDIT_ENTITY_STRIKE: &str = "strike";
pub const AUDIT_ENTITY_ACCOUNT: &str = "account";
