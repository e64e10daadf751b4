//! Fakes for the service layer's collaborators.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use legalguard_cloud::{AuthError, CloudError, RemoteStore, SessionProvider, StaticSession};
use legalguard_core::{
    CaseReport, CaseSubmission, CaseType, ChatMessage, ChatSession, CurrentUser, LegalAnalysis,
    Urgency,
};
use legalguard_llm::{LegalAdvisor, LlmError};
use legalguard_storage::{LocalHistory, MemoryStore};
use tokio::sync::watch;

use crate::HistorySynchronizer;

pub fn test_user() -> CurrentUser {
    CurrentUser {
        id: "user-1".to_owned(),
        email: Some("asha@example.com".to_owned()),
        access_token: "token-1".to_owned(),
    }
}

pub fn report(id: &str, timestamp: i64) -> CaseReport {
    CaseReport {
        id: id.to_owned(),
        timestamp,
        submission: CaseSubmission::new(
            CaseType::ConsumerComplaint,
            format!("Defective phone not replaced ({id})"),
            Urgency::Low,
        ),
        analysis: LegalAnalysis::new(format!("Summary for {id}")),
    }
}

pub fn chat_session(id: &str, title: &str) -> ChatSession {
    ChatSession {
        id: id.to_owned(),
        title: title.to_owned(),
        timestamp: 1_700_000_000_000,
        messages: vec![ChatMessage::user(title)],
    }
}

fn unavailable() -> CloudError {
    CloudError::HttpStatus { code: 503, body: "service unavailable".to_owned() }
}

/// Calls observed by [`FakeRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    ListReports(String),
    InsertReport(String),
    DeleteReport(String),
    ListChatSessions(String),
    InsertChatSession(String),
}

#[derive(Debug, Default)]
struct FakeRemoteState {
    reports: Vec<CaseReport>,
    chat_sessions: Vec<ChatSession>,
    calls: Vec<RemoteCall>,
}

/// Scripted hosted table service.
#[derive(Debug, Default)]
pub struct FakeRemote {
    state: Mutex<FakeRemoteState>,
    failing: bool,
    delay: Option<Duration>,
}

impl FakeRemote {
    pub fn with_records(reports: Vec<CaseReport>, chat_sessions: Vec<ChatSession>) -> Self {
        Self {
            state: Mutex::new(FakeRemoteState { reports, chat_sessions, calls: Vec::new() }),
            ..Self::default()
        }
    }

    /// Every call fails with a 503.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Reads wait `delay` before answering.
    pub fn slow(reports: Vec<CaseReport>, delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::with_records(reports, Vec::new()) }
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn reports(&self) -> Vec<CaseReport> {
        self.state.lock().unwrap().reports.clone()
    }

    pub fn chat_sessions(&self) -> Vec<ChatSession> {
        self.state.lock().unwrap().chat_sessions.clone()
    }

    fn record(&self, call: RemoteCall) -> Result<(), CloudError> {
        self.state.lock().unwrap().calls.push(call);
        if self.failing { Err(unavailable()) } else { Ok(()) }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn list_reports(&self, user: &CurrentUser) -> Result<Vec<CaseReport>, CloudError> {
        self.record(RemoteCall::ListReports(user.id.clone()))?;
        self.pause().await;
        Ok(self.reports())
    }

    async fn insert_report(&self, user: &CurrentUser, report: &CaseReport) -> Result<(), CloudError> {
        self.record(RemoteCall::InsertReport(user.id.clone()))?;
        self.state.lock().unwrap().reports.push(report.clone());
        Ok(())
    }

    async fn delete_report(&self, _user: &CurrentUser, id: &str) -> Result<(), CloudError> {
        self.record(RemoteCall::DeleteReport(id.to_owned()))?;
        self.state.lock().unwrap().reports.retain(|r| r.id != id);
        Ok(())
    }

    async fn list_chat_sessions(&self, user: &CurrentUser) -> Result<Vec<ChatSession>, CloudError> {
        self.record(RemoteCall::ListChatSessions(user.id.clone()))?;
        self.pause().await;
        Ok(self.chat_sessions())
    }

    async fn insert_chat_session(
        &self,
        user: &CurrentUser,
        session: &ChatSession,
    ) -> Result<(), CloudError> {
        self.record(RemoteCall::InsertChatSession(user.id.clone()))?;
        self.state.lock().unwrap().chat_sessions.push(session.clone());
        Ok(())
    }
}

/// Identity provider that is always unreachable.
#[derive(Debug)]
pub struct BrokenSession {
    tx: watch::Sender<Option<CurrentUser>>,
}

impl BrokenSession {
    pub fn new() -> Self {
        Self { tx: watch::channel(None).0 }
    }
}

#[async_trait]
impl SessionProvider for BrokenSession {
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        Err(AuthError::Cloud(unavailable()))
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}

/// Advisor with canned answers that records the history it was given.
#[derive(Debug, Default)]
pub struct FakeAdvisor {
    failing: bool,
    seen_history: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeAdvisor {
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn seen_history(&self) -> Vec<Vec<ChatMessage>> {
        self.seen_history.lock().unwrap().clone()
    }

    fn outage() -> LlmError {
        LlmError::Status { code: 503, body: "overloaded".to_owned() }
    }
}

#[async_trait]
impl LegalAdvisor for FakeAdvisor {
    async fn analyze_case(&self, submission: &CaseSubmission) -> Result<LegalAnalysis, LlmError> {
        if self.failing {
            return Err(Self::outage());
        }
        Ok(LegalAnalysis::new(format!("Analysis of {}", submission.category))
            .with_detail("riskLevel", serde_json::json!("medium")))
    }

    async fn answer_question(
        &self,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.seen_history.lock().unwrap().push(history.to_vec());
        if self.failing {
            return Err(Self::outage());
        }
        Ok(format!("Answer to: {question}"))
    }
}

/// Local history over an in-memory store, returned with the store itself.
pub fn memory_history() -> (LocalHistory, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (LocalHistory::new(store.clone()), store)
}

pub fn synchronizer(
    local: LocalHistory,
    remote: Arc<FakeRemote>,
    session: Arc<dyn SessionProvider>,
) -> HistorySynchronizer {
    HistorySynchronizer::new(local, remote, session)
}

pub fn signed_in() -> Arc<dyn SessionProvider> {
    Arc::new(StaticSession::signed_in(test_user()))
}

pub fn signed_out() -> Arc<dyn SessionProvider> {
    Arc::new(StaticSession::signed_out())
}
