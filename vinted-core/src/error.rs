//! Error types for the Vinted client

use thiserror::Error;

/// Client-wide error type
#[derive(Error, Debug)]
pub enum VintedError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No usable session credential for vinted.{domain}: {message}")]
    CredentialUnavailable { domain: String, message: String },

    #[error("Malformed response body: {body}")]
    MalformedResponse { body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VintedError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        VintedError::Api {
            status,
            body: body.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        VintedError::Transport(msg.into())
    }

    pub fn credential_unavailable(domain: impl Into<String>, message: impl Into<String>) -> Self {
        VintedError::CredentialUnavailable {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Decoding failure; `body` is the raw response kept for diagnosis.
    pub fn malformed(body: impl Into<String>) -> Self {
        VintedError::MalformedResponse { body: body.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        VintedError::Config(msg.into())
    }
}

/// Result type alias for client operations
pub type VintedResult<T> = Result<T, VintedError>;
