//! # verdict-storage
//!
//! SQLite persistence for the moderation engine: reports, the append-only
//! strike ledger, the account and content mirrors, and the audit log.
//! [`StorageEngine`] implements every store trait from `verdict-core`.

pub mod audit;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use verdict_core::errors::{StorageError, VerdictError};

pub(crate) fn to_storage_err(message: String) -> VerdictError {
    VerdictError::StorageError(StorageError::SqliteError { message })
}
