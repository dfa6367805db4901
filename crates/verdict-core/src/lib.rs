//! # verdict-core
//!
//! Foundation crate for the Verdict moderation engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VerdictConfig;
pub use errors::{ErrorKind, VerdictError, VerdictResult};
pub use models::{ContentReport, ContentType, ReportStatus, Strike};
