/// Primary forward to the destination script
///
/// `Forwarder` is the seam the relay pipeline calls through; `HttpForwarder`
/// is the reqwest implementation used in production.

use crate::relay::{error::RelayError, types::OutboundRequest};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Status and body returned by the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    /// Only an exact 200 counts as delivered
    pub fn is_delivered(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// POST the outbound request. Any HTTP status is `Ok`; only serialization
    /// and transport failures are errors.
    async fn forward(&self, request: &OutboundRequest) -> Result<UpstreamResponse, RelayError>;
}

/// Build the HTTP client shared by the forwarder and the notifier
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, RelayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(RelayError::ClientBuild)
}

/// reqwest-backed forwarder
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, request: &OutboundRequest) -> Result<UpstreamResponse, RelayError> {
        let payload = serde_json::to_vec(&request.body).map_err(RelayError::Serialize)?;

        tracing::debug!("🚀 POST {} ({} bytes)", request.url, payload.len());
        let response = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status().as_u16();

        // An unreadable body still leaves a usable status
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("⚠️ Failed to read upstream response body: {}", e);
                String::new()
            }
        };

        tracing::debug!("📡 Upstream responded with status {}", status);
        Ok(UpstreamResponse { status, body })
    }
}
