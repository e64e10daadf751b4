//! Legal case analysis and follow-up Q&A on top of [`LlmClient`].

use async_trait::async_trait;
use legalguard_core::{CaseSubmission, ChatMessage, LegalAnalysis, strip_code_fence, truncate};

use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::client::LlmClient;
use crate::error::LlmError;

const SYSTEM_PROMPT: &str = "You are LegalGuard, a legal-aid assistant for people in India. \
Explain the law in plain language, cite the relevant sections of the Bharatiya Nyaya Sanhita, \
Bharatiya Nagarik Suraksha Sanhita, the Constitution and other statutes where they apply, and \
always point the user to free legal aid (NALSA helpline 15100) when the matter is serious. \
You are not a lawyer and must say so when the user needs one.";

/// The AI collaborator: case analysis and conversational answers.
#[async_trait]
pub trait LegalAdvisor: Send + Sync {
    /// Structured analysis of a submitted case.
    async fn analyze_case(&self, submission: &CaseSubmission) -> Result<LegalAnalysis, LlmError>;

    /// Answer `question` given the prior turns of the conversation.
    async fn answer_question(
        &self,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, LlmError>;
}

fn analysis_prompt(submission: &CaseSubmission) -> String {
    format!(
        r#"Analyze this legal situation.

Category: {category}
Urgency: {urgency}
Description: {description}

Return JSON with these fields:
- summary: 2-3 sentence plain-language summary of the legal position
- applicableLaws: array of {{"section": "...", "act": "...", "explanation": "..."}}
- immediateSteps: array of concrete actions to take now, most urgent first
- rights: array of rights the person can assert
- evidenceToCollect: array of documents or evidence to preserve
- whereToApproach: array of authorities, courts or helplines to approach
- riskLevel: one of "low", "medium", "high""#,
        category = submission.category,
        urgency = submission.urgency,
        description = submission.description.trim(),
    )
}

#[async_trait]
impl LegalAdvisor for LlmClient {
    async fn analyze_case(&self, submission: &CaseSubmission) -> Result<LegalAnalysis, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::new("system", SYSTEM_PROMPT),
                Message::new("user", analysis_prompt(submission)),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };

        let content = self.chat_completion(&request).await?;
        let json = strip_code_fence(&content);
        let analysis: LegalAnalysis =
            serde_json::from_str(json).map_err(|source| LlmError::Malformed {
                context: format!("case analysis (content: {})", truncate(json, 300)),
                source,
            })?;

        tracing::info!(
            category = %submission.category,
            fields = analysis.details.len(),
            "Case analysis received"
        );
        Ok(analysis)
    }

    async fn answer_question(
        &self,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new("system", SYSTEM_PROMPT));
        messages.extend(history.iter().map(|m| Message::new(m.role.as_str(), m.text.clone())));
        messages.push(Message::new("user", question));

        let request = ChatRequest { model: self.model.clone(), messages, response_format: None };
        let answer = self.chat_completion(&request).await?;
        tracing::debug!(turns = history.len(), chars = answer.len(), "Question answered");
        Ok(answer)
    }
}
