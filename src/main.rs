/// chat-relay entry point
///
/// Loads `.env`, reads configuration from the environment and serves:
/// - Health check at /ping
/// - Webhook relay at /google-chat

use chat_relay::{config::Config, server::{init_tracing, start_server}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // A missing or unreadable .env is fatal, nothing is served without it
    if let Err(e) = dotenvy::dotenv() {
        tracing::error!("❌ Error loading .env file: {}", e);
        std::process::exit(1);
    }

    let config = Config::from_env()?;

    start_server(config).await
}
