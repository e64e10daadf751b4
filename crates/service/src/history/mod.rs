//! Merged local-plus-cloud history of case reports and chat sessions.
//!
//! Local records are always read. Cloud records are read only while a user
//! is signed in, and every remote failure degrades to the local view with a
//! [`SyncWarning`] instead of an error.

mod outcome;

use std::sync::Arc;

use legalguard_cloud::{RemoteStore, SessionProvider};
use legalguard_core::{
    CaseReport, CaseSubmission, ChatMessage, ChatSession, CurrentUser, HistoryItem,
    LegalAnalysis, Origin, local_records,
};
use legalguard_storage::LocalHistory;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;

pub use outcome::{
    ChatSaveOutcome, CreatedReport, DeletedReport, HistorySnapshot, RemoteWrite, SyncWarning,
};

/// Cloud half of a load, before it is merged with the local lists.
#[derive(Debug, Default)]
struct RemoteRecords {
    signed_in: bool,
    reports: Vec<CaseReport>,
    chat_sessions: Vec<ChatSession>,
    warnings: Vec<SyncWarning>,
}

/// In-memory view. Local Store writes happen while this is locked, so a
/// load never merges a half-applied mutation.
#[derive(Debug, Default)]
struct HistoryState {
    reports: Vec<HistoryItem<CaseReport>>,
    chat_sessions: Vec<HistoryItem<ChatSession>>,
}

pub struct HistorySynchronizer {
    local: LocalHistory,
    remote: Arc<dyn RemoteStore>,
    session: Arc<dyn SessionProvider>,
    state: Mutex<HistoryState>,
}

impl HistorySynchronizer {
    #[must_use]
    pub fn new(
        local: LocalHistory,
        remote: Arc<dyn RemoteStore>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        Self { local, remote, session, state: Mutex::new(HistoryState::default()) }
    }

    /// Rebuild the merged view from both stores.
    pub async fn load(&self) -> HistorySnapshot {
        let fetched = self.fetch_remote().await;
        self.apply(fetched).await
    }

    /// [`load`](Self::load), discarding the result if `token` fires first.
    ///
    /// Returns `None` when cancelled; the in-memory view is left as it was.
    pub async fn load_with_cancel(&self, token: &CancellationToken) -> Option<HistorySnapshot> {
        let fetched = tokio::select! {
            biased;
            () = token.cancelled() => None,
            fetched = self.fetch_remote() => Some(fetched),
        }?;

        if token.is_cancelled() {
            tracing::debug!("History load finished after cancellation, result dropped");
            return None;
        }
        Some(self.apply(fetched).await)
    }

    /// Reload whenever the signed-in user changes, until `token` fires.
    pub async fn follow_identity(&self, token: &CancellationToken) {
        let mut identity = self.session.subscribe();
        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                changed = identity.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let signed_in = identity.borrow_and_update().is_some();
                    tracing::debug!(signed_in, "Identity changed, reloading history");
                    if self.load_with_cancel(token).await.is_none() {
                        break;
                    }
                },
            }
        }
    }

    async fn fetch_remote(&self) -> RemoteRecords {
        let mut fetched = RemoteRecords::default();
        let Some(user) = self.resolve_user(&mut fetched.warnings).await else {
            return fetched;
        };
        fetched.signed_in = true;

        let (remote_reports, remote_sessions) = tokio::join!(
            self.remote.list_reports(&user),
            self.remote.list_chat_sessions(&user)
        );

        match remote_reports {
            Ok(rows) => fetched.reports = rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cloud reports");
                fetched.warnings.push(SyncWarning::RemoteReportsUnavailable(e.to_string()));
            },
        }
        match remote_sessions {
            Ok(rows) => fetched.chat_sessions = rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cloud chat sessions");
                fetched.warnings.push(SyncWarning::RemoteSessionsUnavailable(e.to_string()));
            },
        }
        fetched
    }

    /// Merge cloud records with the local lists as they are now.
    ///
    /// Local lists are read under the state lock, so writes that landed
    /// while the remote reads were in flight are not lost from the view.
    async fn apply(&self, fetched: RemoteRecords) -> HistorySnapshot {
        let mut state = self.state.lock().await;

        let reports: Vec<_> = self
            .local
            .reports()
            .into_iter()
            .map(HistoryItem::local)
            .chain(fetched.reports.into_iter().map(HistoryItem::cloud))
            .collect();
        let chat_sessions: Vec<_> = self
            .local
            .chat_sessions()
            .into_iter()
            .map(HistoryItem::local)
            .chain(fetched.chat_sessions.into_iter().map(HistoryItem::cloud))
            .collect();

        state.reports.clone_from(&reports);
        state.chat_sessions.clone_from(&chat_sessions);
        drop(state);

        tracing::debug!(
            reports = reports.len(),
            chat_sessions = chat_sessions.len(),
            signed_in = fetched.signed_in,
            "History loaded"
        );
        HistorySnapshot {
            reports,
            chat_sessions,
            signed_in: fetched.signed_in,
            warnings: fetched.warnings,
        }
    }

    async fn resolve_user(&self, warnings: &mut Vec<SyncWarning>) -> Option<CurrentUser> {
        match self.session.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Identity provider failed, continuing signed out");
                warnings.push(SyncWarning::IdentityUnavailable(e.to_string()));
                None
            },
        }
    }

    async fn current_user(&self) -> Option<CurrentUser> {
        self.resolve_user(&mut Vec::new()).await
    }

    /// Record a finished analysis locally, and in the cloud when signed in.
    ///
    /// The local write is authoritative; a failed remote insert is reported
    /// in [`CreatedReport::remote`] and never undoes it.
    pub async fn create_report(
        &self,
        submission: CaseSubmission,
        analysis: LegalAnalysis,
    ) -> Result<CreatedReport, ServiceError> {
        let item = HistoryItem::local(CaseReport::new(submission, analysis));
        {
            let mut state = self.state.lock().await;
            self.local.append_report(&item.record)?;
            insert_local(&mut state.reports, item.clone());
        }

        let remote = match self.current_user().await {
            None => RemoteWrite::Skipped,
            Some(user) => match self.remote.insert_report(&user, &item.record).await {
                Ok(()) => RemoteWrite::Written,
                Err(e) => {
                    tracing::warn!(id = %item.record.id, error = %e, "Cloud report insert failed");
                    RemoteWrite::Failed(e.to_string())
                },
            },
        };

        tracing::info!(id = %item.record.id, remote = ?remote, "Report created");
        Ok(CreatedReport { item, remote })
    }

    /// Remove a report from wherever its origin says it lives.
    ///
    /// The record leaves the merged view even if the remote delete fails;
    /// nothing retries it.
    pub async fn delete_report(
        &self,
        id: &str,
        origin: Origin,
    ) -> Result<DeletedReport, ServiceError> {
        let remote = match origin {
            Origin::Local => RemoteWrite::Skipped,
            Origin::Cloud => match self.current_user().await {
                None => RemoteWrite::Skipped,
                Some(user) => match self.remote.delete_report(&user, id).await {
                    Ok(()) => RemoteWrite::Written,
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "Cloud report delete failed");
                        RemoteWrite::Failed(e.to_string())
                    },
                },
            },
        };

        let reports = {
            let mut state = self.state.lock().await;
            if origin == Origin::Local {
                self.local.remove_report(id)?;
            }
            state.reports.retain(|item| !(item.origin == origin && item.record.id == id));
            state.reports.clone()
        };

        tracing::info!(%id, origin = origin.as_str(), remote = ?remote, "Report deleted");
        Ok(DeletedReport { remote, reports })
    }

    /// Save a transcript as a chat session.
    ///
    /// Signed-in users get a cloud copy only; a failed insert is not
    /// retried and nothing is written locally. Signed-out users get a
    /// local copy.
    pub async fn create_chat_session(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatSaveOutcome, ServiceError> {
        if messages.is_empty() {
            return Err(ServiceError::InvalidInput("chat transcript is empty".to_owned()));
        }
        let session = ChatSession::from_messages(messages);

        if let Some(user) = self.current_user().await {
            return Ok(match self.remote.insert_chat_session(&user, &session).await {
                Ok(()) => {
                    tracing::info!(title = %session.title, "Chat session saved to cloud");
                    ChatSaveOutcome::SavedToCloud
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Cloud chat session insert failed");
                    ChatSaveOutcome::Failed(e.to_string())
                },
            });
        }

        let mut state = self.state.lock().await;
        if let Err(e) = self.local.append_chat_session(&session) {
            tracing::warn!(error = %e, "Local chat session save failed");
            return Ok(ChatSaveOutcome::Failed(e.to_string()));
        }
        insert_local(&mut state.chat_sessions, HistoryItem::local(session));
        drop(state);
        tracing::info!("Chat session saved locally");
        Ok(ChatSaveOutcome::SavedLocally)
    }

    /// Drop every local report. Cloud reports stay in the view.
    pub async fn clear_local_reports(&self) -> Result<(), ServiceError> {
        let mut state = self.state.lock().await;
        self.local.clear_reports()?;
        state.reports.retain(|item| !item.is_local());
        drop(state);
        tracing::info!("Local report history cleared");
        Ok(())
    }

    pub async fn reports(&self) -> Vec<HistoryItem<CaseReport>> {
        self.state.lock().await.reports.clone()
    }

    pub async fn chat_sessions(&self) -> Vec<HistoryItem<ChatSession>> {
        self.state.lock().await.chat_sessions.clone()
    }

    /// Find a loaded chat session by id, either origin.
    pub async fn find_chat_session(&self, id: &str) -> Option<HistoryItem<ChatSession>> {
        self.state.lock().await.chat_sessions.iter().find(|item| item.record.id == id).cloned()
    }

    /// Local-origin reports currently in view, without their tags.
    pub async fn local_reports(&self) -> Vec<CaseReport> {
        local_records(&self.state.lock().await.reports)
    }
}

/// Insert after the last local item, keeping local records ahead of cloud ones.
fn insert_local<T>(items: &mut Vec<HistoryItem<T>>, item: HistoryItem<T>) {
    let at = items.iter().position(|existing| !existing.is_local()).unwrap_or(items.len());
    items.insert(at, item);
}
