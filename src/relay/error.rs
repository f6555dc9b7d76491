/// Relay error type
///
/// The `Display` text of every variant is what the caller sees in the
/// `message` field of a `400` response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound body is not valid JSON
    #[error("{0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Inbound body is valid JSON but not an object
    #[error("expected a JSON object body, found {0}")]
    NotAnObject(&'static str),

    /// Augmented body could not be serialized for the forward
    #[error("{0}")]
    Serialize(#[source] serde_json::Error),

    /// Primary forward failed at the transport level (connect, timeout, bad URL)
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
