use std::fmt;

use legalguard_core::{CaseReport, ChatSession, HistoryItem};
use serde::Serialize;

/// A soft failure observed while syncing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SyncWarning {
    /// The identity provider failed; proceeded as signed out.
    IdentityUnavailable(String),
    /// Cloud reports could not be read.
    RemoteReportsUnavailable(String),
    /// Cloud chat sessions could not be read.
    RemoteSessionsUnavailable(String),
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentityUnavailable(e) => write!(f, "could not check sign-in state: {e}"),
            Self::RemoteReportsUnavailable(e) => write!(f, "cloud reports unavailable: {e}"),
            Self::RemoteSessionsUnavailable(e) => write!(f, "cloud chat sessions unavailable: {e}"),
        }
    }
}

/// The merged view produced by a load.
///
/// Order is local items in storage order, then cloud items in server order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistorySnapshot {
    pub reports: Vec<HistoryItem<CaseReport>>,
    pub chat_sessions: Vec<HistoryItem<ChatSession>>,
    pub signed_in: bool,
    pub warnings: Vec<SyncWarning>,
}

/// Outcome of the remote half of a dual write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RemoteWrite {
    /// No remote call was made (signed out, or not a cloud record).
    Skipped,
    Written,
    /// The remote call failed. The local side is unaffected.
    Failed(String),
}

impl RemoteWrite {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedReport {
    /// Always tagged local until the next load.
    pub item: HistoryItem<CaseReport>,
    pub remote: RemoteWrite,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedReport {
    pub remote: RemoteWrite,
    /// Merged report list after removal.
    pub reports: Vec<HistoryItem<CaseReport>>,
}

/// Where a saved chat session ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ChatSaveOutcome {
    SavedToCloud,
    SavedLocally,
    Failed(String),
}

impl fmt::Display for ChatSaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SavedToCloud => f.write_str("Chat session synced to cloud!"),
            Self::SavedLocally => f.write_str("Chat saved locally. Sign in to sync to cloud!"),
            Self::Failed(e) => write!(f, "Error saving chat session: {e}"),
        }
    }
}
