//! Vinted search client
//!
//! Composes URL translation, session credential resolution, and the search
//! transport into the public `search` operation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use vinted_core::{CatalogItem, VintedError, VintedResult};

use crate::config::ClientConfig;
use crate::query::{translate, Overrides};
use crate::session::{CredentialSource, SessionCache};
use crate::transport::{HttpTransport, SearchTransport};
use crate::types::SearchResponse;

/// Options for a search call.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Accepted for compatibility with existing callers; has no effect on
    /// translation.
    pub disable_order: bool,

    /// Accepted for compatibility with existing callers; has no effect on
    /// translation.
    pub allow_swap: bool,

    /// Parameters set (or overwritten) on the translated query, in the
    /// literal shape supplied.
    pub overrides: Overrides,
}

/// Catalog search client.
///
/// Cheap to clone; clones share the session cache and the underlying HTTP
/// client. Each `search` call is an independent task suspending only at the
/// network awaits, and dropping an in-flight call aborts the underlying
/// request without writing a session cache entry.
#[derive(Clone)]
pub struct VintedClient {
    transport: Arc<dyn SearchTransport>,
    credentials: Arc<dyn CredentialSource>,
    sessions: Arc<SessionCache>,
}

impl VintedClient {
    /// Create a client backed by the HTTP collaborators.
    pub fn new(config: ClientConfig) -> VintedResult<Self> {
        config.validate()?;
        let session_ttl = config.session_ttl;
        let transport = Arc::new(HttpTransport::new(config)?);

        Ok(Self {
            credentials: transport.clone(),
            transport,
            sessions: Arc::new(SessionCache::new(session_ttl)),
        })
    }

    /// Create a client with configuration read from the environment.
    pub fn from_env() -> VintedResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client with explicit collaborators, substituting custom
    /// transports or fakes for the HTTP implementations.
    pub fn with_collaborators(
        transport: Arc<dyn SearchTransport>,
        credentials: Arc<dyn CredentialSource>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            transport,
            credentials,
            sessions: Arc::new(SessionCache::new(session_ttl)),
        }
    }

    /// Search the catalog behind a browser-facing search URL.
    ///
    /// URLs that fail translation complete with an empty result set rather
    /// than an error; this client's callers feed it user-pasted links and
    /// prefer no results over a failure. Credential, transport, and
    /// decoding failures surface as typed errors.
    #[instrument(skip(self, options))]
    pub async fn search(
        &self,
        url: &str,
        options: &SearchOptions,
    ) -> VintedResult<Vec<CatalogItem>> {
        let Some(query) = translate(url, &options.overrides) else {
            warn!("{} is not a valid catalog search URL", url);
            return Ok(Vec::new());
        };

        let credential = self
            .sessions
            .credential_for(&query.domain, self.credentials.as_ref())
            .await?;

        let body = self
            .transport
            .issue_search(&query.domain, &query.querystring, &credential)
            .await?;

        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|_| VintedError::malformed(body))?;

        debug!("Search returned {} items", response.items.len());

        Ok(response
            .items
            .iter()
            .map(|item| item.to_catalog_item())
            .collect())
    }

    /// Number of domains with a cached session credential.
    pub fn cached_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl std::fmt::Debug for VintedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VintedClient")
            .field("cached_sessions", &self.sessions.len())
            .finish()
    }
}
