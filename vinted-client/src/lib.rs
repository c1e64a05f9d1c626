//! Vinted integration for catalog search
//!
//! This crate translates browser-facing catalog search URLs into the query
//! string expected by the marketplace's internal search API, resolves a
//! cached per-domain session credential, and returns decoded catalog items.
//!
//! To route marketplace traffic through a proxy, set the environment
//! variable:
//! - `VINTED_API_HTTPS_PROXY` - HTTPS proxy URL for all requests

pub mod client;
pub mod config;
pub mod query;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{SearchOptions, VintedClient};
pub use config::ClientConfig;
pub use query::{translate, Overrides, ParamAccumulator, ParamValue, TranslatedQuery};
pub use session::{CredentialSource, SessionCache, DEFAULT_SESSION_TTL};
pub use transport::{HttpTransport, SearchTransport};
pub use types::SearchResponse;
