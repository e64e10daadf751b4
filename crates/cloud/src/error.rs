//! Typed error enums for the hosted-service clients.

use legalguard_storage::StorageError;
use thiserror::Error;

/// Failure talking to the hosted table service.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("hosted service not configured")]
    NotConfigured,
}

impl CloudError {
    /// Whether this error is transient (network or server side).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether the service rejected the caller's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::HttpStatus { code: 401 | 403, .. })
    }
}

/// Failure of the session identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Cloud(#[from] CloudError),
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("session expired and could not be refreshed")]
    SessionExpired,
    #[error("session store error: {0}")]
    Storage(#[from] StorageError),
}
