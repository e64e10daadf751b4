//! Failures talking to the OpenAI-compatible model endpoint.

use thiserror::Error;

/// Statuses the endpoint uses for overload and rate limiting.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 529];

#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("model endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model endpoint returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// A body arrived but was not the JSON we asked for.
    #[error("unreadable {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model returned no choices")]
    NoChoices,

    #[error("could not build HTTP client: {0}")]
    ClientInit(String),

    /// Every attempt failed with a retryable error; `last` is the final one.
    #[error("gave up after {attempts} attempts, last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<LlmError> },
}

impl LlmError {
    /// Transport failures and overload statuses; a later attempt may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { code, .. } => RETRYABLE_STATUSES.contains(code),
            Self::RetriesExhausted { last, .. } => last.is_transient(),
            Self::Malformed { .. } | Self::NoChoices | Self::ClientInit(_) => false,
        }
    }
}
