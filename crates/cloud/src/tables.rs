//! PostgREST-dialect client for the `reports` and `chat_sessions` tables.

use async_trait::async_trait;
use legalguard_core::constants::{CHAT_SESSIONS_TABLE, REPORTS_TABLE};
use legalguard_core::{CaseReport, ChatSession, CurrentUser, truncate};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{CloudConfig, status_error};
use crate::error::CloudError;
use crate::remote::RemoteStore;
use crate::rows::{ChatSessionRow, NewChatSessionRow, NewReportRow, ReportRow};

/// Table client for the hosted service. No retries: one request per call.
#[derive(Debug, Clone)]
pub struct TableClient {
    client: reqwest::Client,
    config: CloudConfig,
}

impl TableClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        let client = config.http_client()?;
        Ok(Self { client, config })
    }

    fn request(&self, method: reqwest::Method, table: &str, user: &CurrentUser) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.config.rest_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&user.access_token)
    }

    async fn select_by_user<T: DeserializeOwned>(
        &self,
        table: &str,
        user: &CurrentUser,
    ) -> Result<Vec<T>, CloudError> {
        let user_filter = format!("eq.{}", user.id);
        let response = self
            .request(reqwest::Method::GET, table, user)
            .query(&[("select", "*"), ("user_id", user_filter.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body = response.text().await?;
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|source| CloudError::JsonParse {
                context: format!("{table} rows (body: {})", truncate(&body, 200)),
                source,
            })?;

        Ok(rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(%table, index, error = %e, "Skipping unreadable row");
                    None
                },
            })
            .collect())
    }

    async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        user: &CurrentUser,
        row: &T,
    ) -> Result<(), CloudError> {
        let response = self
            .request(reqwest::Method::POST, table, user)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for TableClient {
    async fn list_reports(&self, user: &CurrentUser) -> Result<Vec<CaseReport>, CloudError> {
        let rows: Vec<ReportRow> = self.select_by_user(REPORTS_TABLE, user).await?;
        tracing::debug!(count = rows.len(), "Fetched cloud reports");
        Ok(rows.into_iter().map(CaseReport::from).collect())
    }

    async fn insert_report(&self, user: &CurrentUser, report: &CaseReport) -> Result<(), CloudError> {
        let row = NewReportRow {
            user_id: &user.id,
            submission: &report.submission,
            analysis: &report.analysis,
            timestamp: report.timestamp,
        };
        self.insert(REPORTS_TABLE, user, &row).await
    }

    async fn delete_report(&self, user: &CurrentUser, id: &str) -> Result<(), CloudError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .request(reqwest::Method::DELETE, REPORTS_TABLE, user)
            .query(&[("id", id_filter.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn list_chat_sessions(&self, user: &CurrentUser) -> Result<Vec<ChatSession>, CloudError> {
        let rows: Vec<ChatSessionRow> = self.select_by_user(CHAT_SESSIONS_TABLE, user).await?;
        tracing::debug!(count = rows.len(), "Fetched cloud chat sessions");
        Ok(rows.into_iter().map(ChatSession::from).collect())
    }

    async fn insert_chat_session(
        &self,
        user: &CurrentUser,
        session: &ChatSession,
    ) -> Result<(), CloudError> {
        let row = NewChatSessionRow {
            user_id: &user.id,
            title: &session.title,
            messages: &session.messages,
            timestamp: session.timestamp,
        };
        self.insert(CHAT_SESSIONS_TABLE, user, &row).await
    }
}
