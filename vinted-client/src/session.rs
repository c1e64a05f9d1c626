//! Per-domain session credential cache
//!
//! The search API authenticates with a short-lived session cookie scoped to
//! a top-level domain. Acquiring one costs a round-trip to the marketplace
//! root page, so credentials are cached and reused inside a freshness
//! window, then refreshed through the credential source on demand.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use vinted_core::{VintedError, VintedResult};

/// Default freshness window for cached session credentials.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60);

/// Source of fresh session credentials, one per top-level domain.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Obtain a fresh credential for `vinted.<domain>`.
    async fn acquire(&self, domain: &str) -> VintedResult<String>;
}

/// A cached credential with its acquisition time.
#[derive(Debug, Clone)]
struct CachedCredential {
    credential: String,
    acquired_at: Instant,
}

impl CachedCredential {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.acquired_at.elapsed() < ttl
    }
}

/// In-memory, process-lifetime cache of session credentials keyed by domain.
///
/// Shared across concurrent searches. Two concurrent misses for one domain
/// may both refresh; the surviving entry is whichever write lands last, and
/// at least one fresh entry remains — exactly-one-refresh is not a goal.
/// Entries are replaced on refresh and never explicitly deleted.
#[derive(Debug)]
pub struct SessionCache {
    entries: DashMap<String, CachedCredential>,
    ttl: Duration,
}

impl SessionCache {
    /// Create a cache whose entries stay reusable for `ttl` after
    /// acquisition.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Resolve a credential for `domain`, reusing the cached value while it
    /// is fresh and refreshing through `source` otherwise.
    ///
    /// Acquisition failure surfaces as
    /// [`VintedError::CredentialUnavailable`]; a stale entry is never
    /// silently reused. The cache write happens strictly after the
    /// acquisition await completes, so a caller that drops the future
    /// mid-flight leaves no entry behind.
    pub async fn credential_for(
        &self,
        domain: &str,
        source: &dyn CredentialSource,
    ) -> VintedResult<String> {
        // The lookup guard must drop before the insert below; holding it
        // across the write can deadlock on the same shard.
        {
            if let Some(entry) = self.entries.get(domain) {
                if entry.is_fresh(self.ttl) {
                    debug!(domain, "reusing cached session credential");
                    return Ok(entry.credential.clone());
                }
                debug!(domain, "cached session credential expired");
            }
        }

        let credential = match source.acquire(domain).await {
            Ok(credential) => credential,
            Err(err @ VintedError::CredentialUnavailable { .. }) => return Err(err),
            Err(err) => {
                return Err(VintedError::credential_unavailable(domain, err.to_string()))
            }
        };

        self.entries.insert(
            domain.to_string(),
            CachedCredential {
                credential: credential.clone(),
                acquired_at: Instant::now(),
            },
        );
        debug!(domain, "stored refreshed session credential");

        Ok(credential)
    }

    /// Number of domains with a stored credential.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
