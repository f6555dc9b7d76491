/// Relay pipeline
///
/// Reshapes an inbound request, forwards it, and raises an alert when the
/// destination does not answer 200. Requests share no mutable state; the
/// service is cloned into every handler invocation.

use crate::config::RelayConfig;
use crate::relay::{
    error::RelayError,
    forwarder::{build_http_client, Forwarder, HttpForwarder},
    notifier::{Notifier, WebhookNotifier},
    types::InboundRequest,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// What happened to an accepted relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Destination answered 200
    Delivered,
    /// Destination answered something else; an alert was raised
    Rejected { status: u16 },
}

#[derive(Clone)]
pub struct RelayService {
    upstream_base_url: String,
    forwarder: Arc<dyn Forwarder>,
    notifier: Arc<dyn Notifier>,
}

impl RelayService {
    pub fn new(
        upstream_base_url: impl Into<String>,
        forwarder: Arc<dyn Forwarder>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            upstream_base_url: upstream_base_url.into(),
            forwarder,
            notifier,
        }
    }

    /// Production wiring: reqwest forwarder and webhook notifier sharing one client
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = build_http_client(config.timeout())?;
        Ok(Self::new(
            config.upstream_base_url.clone(),
            Arc::new(HttpForwarder::new(client.clone())),
            Arc::new(WebhookNotifier::new(client, config.error_notif_url.clone())),
        ))
    }

    /// Relay one inbound request
    ///
    /// Errors are limited to serialization and transport failures of the
    /// primary forward. A non-200 answer is `Ok(RelayOutcome::Rejected)`.
    pub async fn relay(&self, inbound: InboundRequest) -> Result<RelayOutcome, RelayError> {
        let span = tracing::info_span!(
            "relay",
            relay_id = %Uuid::new_v4(),
            script_id = %inbound.script_id()
        );
        self.relay_inner(inbound).instrument(span).await
    }

    async fn relay_inner(&self, inbound: InboundRequest) -> Result<RelayOutcome, RelayError> {
        let outbound = inbound.into_outbound(&self.upstream_base_url);
        tracing::debug!(
            "📦 Forwarding {} body fields to script '{}'",
            outbound.body.len(),
            outbound.script_id
        );

        let started = std::time::Instant::now();
        let response = match self.forwarder.forward(&outbound).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Forward failed after {:?}: {}", started.elapsed(), e);
                return Err(e);
            }
        };

        if response.is_delivered() {
            tracing::info!("✅ Relayed in {:?}", started.elapsed());
            return Ok(RelayOutcome::Delivered);
        }

        tracing::warn!(
            "⚠️ Destination answered {} after {:?}",
            response.status,
            started.elapsed()
        );
        tracing::debug!("📄 Destination body: {}", response.body);

        self.notifier
            .notify(&format!("status {}: {}", response.status, response.body))
            .await;

        Ok(RelayOutcome::Rejected {
            status: response.status,
        })
    }
}
