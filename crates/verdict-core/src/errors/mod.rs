//! Error taxonomy for the moderation engine.
//!
//! Every variant of [`VerdictError`] maps onto one [`ErrorKind`], which is what
//! callers branch on: validation and not-found errors are never retried,
//! invalid-state errors surface as conflicts, dependency errors are transient.

mod storage_error;

pub use storage_error::StorageError;

use crate::models::{ContentType, ReportStatus};

/// Result alias used across the workspace.
pub type VerdictResult<T> = Result<T, VerdictError>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    #[error("validation failed for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("report not found: {id}")]
    ReportNotFound { id: String },

    #[error("{content_type} not found: {id}")]
    ContentNotFound { content_type: ContentType, id: String },

    #[error("account not found: {id}")]
    AccountNotFound { id: String },

    #[error("report {report_id} is already {status}")]
    InvalidState {
        report_id: String,
        status: ReportStatus,
    },

    #[error("a strike is already recorded for report {report_id}")]
    StrikeAlreadyRecorded { report_id: String },

    #[error("actor {actor} is not a moderator")]
    Unauthorized { actor: String },

    #[error("dependency `{dependency}` failed: {reason}")]
    Dependency { dependency: String, reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("notification failed: {reason}")]
    NotificationError { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse classification of [`VerdictError`] used for retry and status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidState,
    Unauthorized,
    Dependency,
}

impl VerdictError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a failed call into an external collaborator.
    pub fn dependency(dependency: &str, reason: impl Into<String>) -> Self {
        Self::Dependency {
            dependency: dependency.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::ConfigError(_) | Self::SerializationError(_) => {
                ErrorKind::Validation
            }
            Self::ReportNotFound { .. }
            | Self::ContentNotFound { .. }
            | Self::AccountNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } | Self::StrikeAlreadyRecorded { .. } => {
                ErrorKind::InvalidState
            }
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Dependency { .. } | Self::StorageError(_) | Self::NotificationError { .. } => {
                ErrorKind::Dependency
            }
        }
    }

    /// Only transient dependency failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Dependency
    }
}
