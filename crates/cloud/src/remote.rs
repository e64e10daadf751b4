use async_trait::async_trait;
use legalguard_core::{CaseReport, ChatSession, CurrentUser};

use crate::error::CloudError;

/// Per-user record storage on the hosted service.
///
/// Writes are independent calls with no transaction spanning them.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Reports owned by `user`, in server order.
    async fn list_reports(&self, user: &CurrentUser) -> Result<Vec<CaseReport>, CloudError>;

    /// Insert a report owned by `user`. The server assigns the row id.
    async fn insert_report(&self, user: &CurrentUser, report: &CaseReport) -> Result<(), CloudError>;

    /// Delete the report with the given server id.
    async fn delete_report(&self, user: &CurrentUser, id: &str) -> Result<(), CloudError>;

    /// Saved chat sessions owned by `user`, in server order.
    async fn list_chat_sessions(&self, user: &CurrentUser) -> Result<Vec<ChatSession>, CloudError>;

    /// Insert a chat session owned by `user`. The server assigns the row id.
    async fn insert_chat_session(
        &self,
        user: &CurrentUser,
        session: &ChatSession,
    ) -> Result<(), CloudError>;
}

/// Stand-in used when no hosted service is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRemote;

#[async_trait]
impl RemoteStore for DisabledRemote {
    async fn list_reports(&self, _user: &CurrentUser) -> Result<Vec<CaseReport>, CloudError> {
        Err(CloudError::NotConfigured)
    }

    async fn insert_report(&self, _user: &CurrentUser, _report: &CaseReport) -> Result<(), CloudError> {
        Err(CloudError::NotConfigured)
    }

    async fn delete_report(&self, _user: &CurrentUser, _id: &str) -> Result<(), CloudError> {
        Err(CloudError::NotConfigured)
    }

    async fn list_chat_sessions(&self, _user: &CurrentUser) -> Result<Vec<ChatSession>, CloudError> {
        Err(CloudError::NotConfigured)
    }

    async fn insert_chat_session(
        &self,
        _user: &CurrentUser,
        _session: &ChatSession,
    ) -> Result<(), CloudError> {
        Err(CloudError::NotConfigured)
    }
}
