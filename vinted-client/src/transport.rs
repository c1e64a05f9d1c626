//! HTTP collaborators for the search client
//!
//! [`HttpTransport`] implements both external interfaces the orchestrator
//! depends on: acquiring a session credential from the marketplace root page
//! and issuing the catalog search request. One `reqwest` client backs both,
//! optionally routed through a configured HTTPS proxy.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::{Client, Proxy};
use tracing::debug;
use vinted_core::{VintedError, VintedResult};

use crate::config::ClientConfig;
use crate::session::CredentialSource;

/// Transport for the catalog search endpoint.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Send `querystring` to the catalog search endpoint of
    /// `vinted.<domain>` with `credential` attached as the session cookie,
    /// returning the raw response body.
    async fn issue_search(
        &self,
        domain: &str,
        querystring: &str,
        credential: &str,
    ) -> VintedResult<String>;
}

/// Reqwest-backed implementation of both external collaborators.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the HTTP client from `config`.
    pub fn new(config: ClientConfig) -> VintedResult<Self> {
        let mut builder = Client::builder().timeout(config.request_timeout);
        if let Some(proxy_url) = &config.https_proxy {
            let proxy = Proxy::https(proxy_url.as_str())
                .map_err(|e| VintedError::config(format!("Invalid HTTPS proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| VintedError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Session cookie name used by `vinted.<domain>`.
    fn session_cookie_name(domain: &str) -> String {
        format!("_vinted_{}_session", domain)
    }
}

#[async_trait]
impl CredentialSource for HttpTransport {
    async fn acquire(&self, domain: &str) -> VintedResult<String> {
        let url = format!("https://www.vinted.{}/", domain);

        debug!("Fetching session credential from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, self.config.user_agent())
            .send()
            .await
            .map_err(|e| VintedError::transport(format!("Failed to fetch session page: {}", e)))?;

        let cookie_name = Self::session_cookie_name(domain);
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = header.to_str() else { continue };
            if let Some(value) = parse_cookie_value(raw, &cookie_name) {
                return Ok(value);
            }
        }

        Err(VintedError::credential_unavailable(
            domain,
            format!("no {} cookie in response", cookie_name),
        ))
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn issue_search(
        &self,
        domain: &str,
        querystring: &str,
        credential: &str,
    ) -> VintedResult<String> {
        let url = format!(
            "https://www.vinted.{}/api/v2/catalog/items?{}",
            domain, querystring
        );

        debug!("Issuing catalog search: {}", url);

        let cookie = format!("{}={}", Self::session_cookie_name(domain), credential);
        let response = self
            .client
            .get(&url)
            .header(COOKIE, cookie)
            .header(USER_AGENT, self.config.user_agent())
            .header(ACCEPT, "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| VintedError::transport(format!("Failed to reach search API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VintedError::api(status, body));
        }

        response
            .text()
            .await
            .map_err(|e| VintedError::transport(format!("Failed to read search response: {}", e)))
    }
}

/// Extract the value of cookie `name` from a single `Set-Cookie` header
/// line, ignoring attributes after the first `;`.
fn parse_cookie_value(header: &str, name: &str) -> Option<String> {
    let first = header.split(';').next()?;
    let (cookie_name, value) = first.split_once('=')?;
    if cookie_name.trim() == name && !value.is_empty() {
        Some(value.to_string())
    } else {
        None
    }
}
