// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "verdict.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Escalation ---
pub const DEFAULT_STRIKE_THRESHOLD: u32 = 3;
pub const DEFAULT_STRIKE_WINDOW_DAYS: i64 = 90;
pub const MAX_STRIKE_WINDOW_DAYS: i64 = 36_500;

// --- Notification ---
pub const DEFAULT_NOTIFY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_NOTIFY_SUBJECT: &str = "Your account has been blocked";

// --- Intake ---
pub const DEFAULT_MAX_REASON_LEN: usize = 100;
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 2_000;
