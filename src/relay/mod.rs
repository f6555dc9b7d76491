/// Relay Layer
///
/// This module holds the whole forward pipeline for inbound webhooks:
/// - Request reshaping (header capture, routing identifier, destination URL)
/// - Primary forward to the selected Apps Script endpoint
/// - Best-effort alerting when the destination answers with a non-200 status

// Inbound/outbound data model and reshaping helpers
pub mod types;

// Error type shared by the pipeline
pub mod error;

// Primary outbound POST
pub mod forwarder;

// Best-effort alerting webhook
pub mod notifier;

// Linear relay pipeline wiring forwarder and notifier together
pub mod service;

// Re-export commonly used types
pub use error::RelayError;
pub use forwarder::{build_http_client, Forwarder, HttpForwarder, UpstreamResponse};
pub use notifier::{Notifier, WebhookNotifier};
pub use service::{RelayOutcome, RelayService};
pub use types::{ForwardedHeaders, InboundRequest, JsonObject, OutboundRequest, QueryParams};
