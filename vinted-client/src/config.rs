//! Client configuration

use std::env;
use std::time::Duration;

use rand::seq::IndexedRandom;
use vinted_core::{VintedError, VintedResult};

use crate::session::DEFAULT_SESSION_TTL;

/// Environment variable naming an HTTPS proxy for all marketplace traffic.
pub const HTTPS_PROXY_ENV: &str = "VINTED_API_HTTPS_PROXY";

/// Realistic browser user-agents rotated when no custom one is configured.
const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
];

/// Configuration for [`VintedClient`](crate::client::VintedClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,

    /// Freshness window for cached session credentials.
    pub session_ttl: Duration,

    /// Optional HTTPS proxy URL for all marketplace traffic.
    pub https_proxy: Option<String>,

    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser user-agents.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            session_ttl: DEFAULT_SESSION_TTL,
            https_proxy: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the proxy read from `VINTED_API_HTTPS_PROXY`.
    pub fn from_env() -> Self {
        Self {
            https_proxy: env::var(HTTPS_PROXY_ENV).ok().filter(|v| !v.is_empty()),
            ..Self::default()
        }
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    pub fn validate(&self) -> VintedResult<()> {
        if self.request_timeout.is_zero() {
            return Err(VintedError::config(
                "request_timeout must be greater than 0",
            ));
        }
        if self.session_ttl.is_zero() {
            return Err(VintedError::config("session_ttl must be greater than 0"));
        }
        Ok(())
    }

    /// The User-Agent for the next request: the configured value, or a
    /// random pick from the built-in pool.
    pub fn user_agent(&self) -> String {
        match &self.user_agent {
            Some(ua) => ua.clone(),
            None => USER_AGENTS
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(USER_AGENTS[0])
                .to_string(),
        }
    }
}
