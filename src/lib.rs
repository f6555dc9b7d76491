/// chat-relay: webhook relay for Google Apps Script endpoints
///
/// Accepts a JSON webhook, folds its headers into the body and forwards it to
/// the script named by `script_id`. Non-200 answers are reported to an
/// alerting webhook.

// Configuration read once from the environment
pub mod config;

// Request reshaping, forwarding and alerting
pub mod relay;

// HTTP endpoints
pub mod api;

// Server setup and initialization
pub mod server;

pub use config::Config;
pub use relay::{RelayError, RelayService};
pub use server::{build_router, create_app, start_server};
