//! Typed error enum for the service layer.
//!
//! Only failures the caller must act on surface here. Remote-store and
//! identity failures are soft and travel as warnings on the results instead.

use legalguard_llm::LlmError;
use legalguard_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Local Store write failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// AI collaborator call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input (blank description, empty transcript).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required backend (AI endpoint) is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            _ => false,
        }
    }
}
