use std::time::Duration;

use legalguard_core::{Settings, truncate};

use crate::error::CloudError;

/// Connection details shared by the table and auth clients.
#[derive(Clone)]
pub struct CloudConfig {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) timeout: Duration,
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CloudConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, anon_key: anon_key.into(), timeout: Duration::from_secs(60) }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Config from settings, `None` when the hosted service is not configured.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        match (&settings.supabase_url, &settings.supabase_anon_key) {
            (Some(url), Some(key)) => Some(
                Self::new(url.clone(), key.clone())
                    .with_timeout(Duration::from_secs(settings.http_timeout_secs)),
            ),
            _ => None,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, CloudError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CloudError::ClientInit(e.to_string()))
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

/// Read a failed response into a [`CloudError::HttpStatus`].
pub(crate) async fn status_error(response: reqwest::Response) -> CloudError {
    let code = response.status().as_u16();
    let body = response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
    CloudError::HttpStatus { code, body: truncate(&body, 500).to_owned() }
}
