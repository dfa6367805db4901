//! JSON POST to an email dispatch endpoint, bounded by the configured timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use verdict_core::config::NotificationConfig;
use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::BlockNotice;
use verdict_core::traits::INotifier;

pub struct WebhookNotifier {
    client: Client,
    url: String,
    subject: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    account_id: &'a str,
    reason: &'a str,
    strike_count: u32,
}

impl WebhookNotifier {
    pub fn new(url: &str, config: &NotificationConfig) -> VerdictResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| VerdictError::ConfigError(format!("notification client: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
            subject: config.subject.clone(),
        })
    }
}

impl INotifier for WebhookNotifier {
    fn notify_blocked(&self, notice: &BlockNotice) -> VerdictResult<()> {
        let payload = EmailPayload {
            to: &notice.address,
            subject: &self.subject,
            account_id: &notice.account_id,
            reason: &notice.reason,
            strike_count: notice.strike_count,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| VerdictError::NotificationError {
                reason: e.to_string(),
            })?;
        response
            .error_for_status()
            .map_err(|e| VerdictError::NotificationError {
                reason: e.to_string(),
            })?;
        debug!(account_id = %notice.account_id, "dispatch endpoint accepted notice");
        Ok(())
    }
}
