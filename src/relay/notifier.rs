/// Best-effort alerting
///
/// The notifier reports failed forwards to a chat webhook. It never returns an
/// error and never retries; failures are only logged.

use async_trait::async_trait;
use serde_json::{json, Value};

/// Prefix that marks alerts coming from this relay
pub const NOTIFICATION_PREFIX: &str = "FROM WEBHOOK";

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Body posted to the alerting webhook
pub fn notification_payload(message: &str) -> Value {
    json!({ "text": format!("{}\n{}", NOTIFICATION_PREFIX, message) })
}

/// Posts alerts to `ERROR_NOTIF_URL`
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    /// Alerting webhook URL, `None` when alerting is not configured
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) {
        let Some(url) = self.url.as_deref() else {
            tracing::warn!("🔕 ERROR_NOTIF_URL not set, dropping alert: {}", message);
            return;
        };

        match self
            .client
            .post(url)
            .json(&notification_payload(message))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("📣 Alert delivered ({})", response.status());
            }
            Ok(response) => {
                tracing::warn!("⚠️ Alert webhook answered {}", response.status());
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to send alert: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_prefixes_message() {
        assert_eq!(
            notification_payload("status 500: boom"),
            json!({ "text": "FROM WEBHOOK\nstatus 500: boom" })
        );
    }

    #[tokio::test]
    async fn unconfigured_notifier_is_a_no_op() {
        let notifier = WebhookNotifier::new(reqwest::Client::new(), None);
        notifier.notify("status 502: bad gateway").await;
    }
}
