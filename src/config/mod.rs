/// Configuration management for the relay
///
/// Values are read from the process environment once at startup (after `.env`
/// has been loaded) and handed to the server by value. Nothing reads the
/// environment afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default destination base for Apps Script web apps
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://script.google.com/macros/s";

/// Default timeout for both outbound calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Outbound relay configuration
    pub relay: RelayConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Outbound call configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base URL the routing identifier is appended to, without trailing slash
    pub upstream_base_url: String,
    /// Alerting webhook for non-200 upstream responses. `None` disables alerts.
    pub error_notif_url: Option<String>,
    /// Timeout applied to the forward and to the notification
    pub timeout_secs: u64,
}

impl RelayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Errors raised while reading configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("invalid RELAY_TIMEOUT_SECS value '{0}'")]
    InvalidTimeout(String),
}

impl Config {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset, matching how `.env` files usually
    /// leave placeholders.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 8080,
        };

        let timeout_secs = match get("RELAY_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let upstream_base_url = get("RELAY_UPSTREAM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
            relay: RelayConfig {
                upstream_base_url,
                error_notif_url: get("ERROR_NOTIF_URL"),
                timeout_secs,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            relay: RelayConfig {
                upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
                error_notif_url: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.relay.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.relay.error_notif_url, None);
        assert_eq!(config.relay.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("ERROR_NOTIF_URL", "https://chat.example.com/hook"),
            ("RELAY_UPSTREAM_BASE_URL", "http://localhost:1234/s/"),
            ("RELAY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.relay.error_notif_url.as_deref(),
            Some("https://chat.example.com/hook")
        );
        assert_eq!(config.relay.upstream_base_url, "http://localhost:1234/s");
        assert_eq!(config.relay.timeout_secs, 5);
    }

    #[test]
    fn blank_notification_url_disables_alerts() {
        let config = Config::from_lookup(lookup(&[("ERROR_NOTIF_URL", "  ")])).unwrap();
        assert!(config.relay.error_notif_url.is_none());
    }

    #[test]
    fn rejects_bad_port_and_timeout() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("RELAY_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
