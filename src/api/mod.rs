/// HTTP API Layer
///
/// This module provides the relay's HTTP endpoints:
/// - Health check
/// - Webhook relay to Apps Script

use serde::{Deserialize, Serialize};

// Liveness endpoint
pub mod health;

// Webhook relay endpoint
pub mod relay;

// Re-export router builders
pub use health::create_health_routes;
pub use relay::{create_relay_routes, RelayAppState};

/// `{"message": "..."}` body used by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
