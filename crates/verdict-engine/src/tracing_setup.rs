//! Tracing setup: structured JSON logging and span definitions.

use tracing_subscriber::EnvFilter;

/// Install the JSON subscriber, filtered by `VERDICT_LOG` (default `info`).
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = std::env::var("VERDICT_LOG").unwrap_or_else(|_| "info".to_string());
    init_tracing_with_filter(&filter)
}

/// Install the JSON subscriber with an explicit filter directive.
/// Returns false if a global subscriber was already installed.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .try_init()
        .is_ok()
}

/// Create an intake span.
#[macro_export]
macro_rules! intake_span {
    ($content_type:expr, $content_id:expr) => {
        tracing::info_span!(
            "verdict.intake",
            content_type = %$content_type,
            content_id = %$content_id
        )
    };
}

/// Create a decision span.
#[macro_export]
macro_rules! decision_span {
    ($report_id:expr, $action:expr) => {
        tracing::info_span!("verdict.decision", report_id = %$report_id, action = %$action)
    };
}

/// Create an enforcement span.
#[macro_export]
macro_rules! enforcement_span {
    ($account_id:expr, $strike_count:expr) => {
        tracing::info_span!(
            "verdict.enforcement",
            account_id = %$account_id,
            strike_count = $strike_count
        )
    };
}
