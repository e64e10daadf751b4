//! The active Q&A transcript and saving it as a chat session.

use std::sync::Arc;

use legalguard_core::constants::ASSISTANT_FALLBACK_TEXT;
use legalguard_core::{ChatMessage, ChatSession};
use legalguard_llm::LegalAdvisor;
use legalguard_storage::LocalHistory;
use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::history::{ChatSaveOutcome, HistorySynchronizer};

pub struct ChatService {
    advisor: Option<Arc<dyn LegalAdvisor>>,
    local: LocalHistory,
    history: Arc<HistorySynchronizer>,
    transcript: Mutex<Vec<ChatMessage>>,
}

impl ChatService {
    /// Restores the persisted transcript. `advisor` is `None` when no AI
    /// key is configured; [`ask`](Self::ask) then fails.
    #[must_use]
    pub fn new(
        advisor: Option<Arc<dyn LegalAdvisor>>,
        local: LocalHistory,
        history: Arc<HistorySynchronizer>,
    ) -> Self {
        let transcript = Mutex::new(local.transcript());
        Self { advisor, local, history, transcript }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.clone()
    }

    /// Append `question` and the advisor's answer to the transcript.
    ///
    /// An advisor failure is answered with a fixed fallback message rather
    /// than an error, so the turn is never lost.
    pub async fn ask(&self, question: &str) -> Result<ChatMessage, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ServiceError::InvalidInput("question is empty".to_owned()));
        }
        let Some(ref advisor) = self.advisor else {
            return Err(ServiceError::NotConfigured("AI API key".to_owned()));
        };

        let prior = {
            let mut transcript = self.transcript.lock().await;
            let prior = transcript.clone();
            transcript.push(ChatMessage::user(question));
            self.local.save_transcript(&transcript)?;
            prior
        };

        let text = match advisor.answer_question(question, &prior).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Advisor failed to answer, using fallback");
                ASSISTANT_FALLBACK_TEXT.to_owned()
            },
        };

        let answer = ChatMessage::assistant(text);
        let mut transcript = self.transcript.lock().await;
        transcript.push(answer.clone());
        self.local.save_transcript(&transcript)?;
        Ok(answer)
    }

    /// Start over with an empty transcript.
    pub async fn new_chat(&self) -> Result<(), ServiceError> {
        self.transcript.lock().await.clear();
        self.local.clear_transcript()?;
        Ok(())
    }

    /// Make a saved session's messages the active transcript.
    pub async fn open_session(&self, session: &ChatSession) -> Result<(), ServiceError> {
        let mut transcript = self.transcript.lock().await;
        transcript.clone_from(&session.messages);
        self.local.save_transcript(&transcript)?;
        tracing::debug!(id = %session.id, messages = transcript.len(), "Chat session opened");
        Ok(())
    }

    pub async fn save_session(&self) -> Result<ChatSaveOutcome, ServiceError> {
        let messages = self.messages().await;
        self.history.create_chat_session(messages).await
    }
}
