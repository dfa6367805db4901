//! Fire-and-forget block notices.
//!
//! Each notice runs on its own thread so the decision returns without
//! waiting on email delivery. Failures are logged and dropped.

mod log_notifier;
mod webhook;

pub use log_notifier::LogNotifier;
pub use webhook::WebhookNotifier;

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::{info, warn};

use verdict_core::config::NotificationConfig;
use verdict_core::errors::VerdictResult;
use verdict_core::models::BlockNotice;
use verdict_core::traits::INotifier;

/// Pick the notifier for a config: webhook when a URL is set, log otherwise.
pub fn notifier_from_config(config: &NotificationConfig) -> VerdictResult<Arc<dyn INotifier>> {
    let notifier: Arc<dyn INotifier> = match &config.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url, config)?),
        None => Arc::new(LogNotifier),
    };
    Ok(notifier)
}

pub struct NotificationDispatcher {
    notifier: Arc<dyn INotifier>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn INotifier>) -> Self {
        Self {
            notifier,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Send `notice` in the background. Never fails the caller.
    pub fn dispatch(&self, notice: BlockNotice) {
        let notifier = Arc::clone(&self.notifier);
        let account_id = notice.account_id.clone();
        let spawned = std::thread::Builder::new()
            .name("verdict-notify".to_string())
            .spawn(move || match notifier.notify_blocked(&notice) {
                Ok(()) => info!(account_id = %notice.account_id, "block notice sent"),
                Err(e) => warn!(
                    account_id = %notice.account_id,
                    error = %e,
                    "block notice failed; dropping"
                ),
            });

        match spawned {
            Ok(handle) => {
                let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
                in_flight.retain(|h| !h.is_finished());
                in_flight.push(handle);
            }
            Err(e) => warn!(account_id = %account_id, error = %e, "could not spawn notifier thread"),
        }
    }

    /// Wait for every outstanding notice. Returns how many were joined.
    pub fn flush(&self) -> usize {
        let handles: Vec<JoinHandle<()>> = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            in_flight.drain(..).collect()
        };
        let joined = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                warn!("notifier thread panicked");
            }
        }
        joined
    }
}
