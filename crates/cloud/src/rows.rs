//! Wire shapes of the two remote tables.

use legalguard_core::{CaseReport, CaseSubmission, ChatMessage, ChatSession, LegalAnalysis};
use serde::{Deserialize, Serialize};

/// Server-assigned row id; serial tables return numbers, uuid tables strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRow {
    id: RowId,
    timestamp: i64,
    submission: CaseSubmission,
    analysis: LegalAnalysis,
}

impl From<ReportRow> for CaseReport {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id.into_string(),
            timestamp: row.timestamp,
            submission: row.submission,
            analysis: row.analysis,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewReportRow<'a> {
    pub user_id: &'a str,
    pub submission: &'a CaseSubmission,
    pub analysis: &'a LegalAnalysis,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatSessionRow {
    id: RowId,
    title: String,
    timestamp: i64,
    messages: Vec<ChatMessage>,
}

impl From<ChatSessionRow> for ChatSession {
    fn from(row: ChatSessionRow) -> Self {
        Self {
            id: row.id.into_string(),
            title: row.title,
            timestamp: row.timestamp,
            messages: row.messages,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewChatSessionRow<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub messages: &'a [ChatMessage],
    pub timestamp: i64,
}
