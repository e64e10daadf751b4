//! Email/password auth against the hosted service (GoTrue dialect).
//!
//! The session is persisted in the Local Store under `legalguard_auth_session`
//! and restored on construction, so a signed-in user stays signed in across
//! runs. Expired access tokens are refreshed on demand.

use async_trait::async_trait;
use legalguard_core::constants::AUTH_SESSION_KEY;
use legalguard_core::{CurrentUser, now_millis, truncate};
use legalguard_storage::LocalHistory;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};

use crate::config::{CloudConfig, status_error};
use crate::error::{AuthError, CloudError};
use crate::session::SessionProvider;

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN_MILLIS: i64 = 60_000;

#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    access_token: String,
    refresh_token: Option<String>,
    /// Milliseconds since the Unix epoch.
    expires_at: Option<i64>,
    user: AuthUser,
}

impl StoredSession {
    fn current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.user.id.clone(),
            email: self.user.email.clone(),
            access_token: self.access_token.clone(),
        }
    }

    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at - EXPIRY_MARGIN_MILLIS <= now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> StoredSession {
        StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.map(|secs| now_millis() + secs * 1000),
            user: self.user,
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in.
    SignedIn(CurrentUser),
    /// Account created; the user must confirm their e-mail before signing in.
    ConfirmationPending,
}

pub struct PasswordAuth {
    client: reqwest::Client,
    config: CloudConfig,
    local: LocalHistory,
    session: Mutex<Option<StoredSession>>,
    tx: watch::Sender<Option<CurrentUser>>,
}

impl std::fmt::Debug for PasswordAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordAuth").field("config", &self.config).finish_non_exhaustive()
    }
}

impl PasswordAuth {
    /// Restore any persisted session from `local`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CloudConfig, local: LocalHistory) -> Result<Self, CloudError> {
        let client = config.http_client()?;
        let restored: Option<StoredSession> = local.load_value(AUTH_SESSION_KEY);
        if let Some(ref s) = restored {
            tracing::debug!(user_id = %s.user.id, "Restored auth session");
        }
        let (tx, _rx) = watch::channel(restored.as_ref().map(StoredSession::current_user));
        Ok(Self { client, config, local, session: Mutex::new(restored), tx })
    }

    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] on a 400/401 response, or the
    /// underlying error if the request fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let response = self
            .client
            .post(self.config.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(CloudError::from)?;

        let status = response.status();
        if matches!(status.as_u16(), 400 | 401) {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::InvalidCredentials(truncate(&body, 200).to_owned()));
        }
        if !status.is_success() {
            return Err(status_error(response).await.into());
        }

        let token: TokenResponse = parse_body(response, "sign-in response").await?;
        let session = token.into_session();
        let user = session.current_user();
        self.install(Some(session)).await?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// # Errors
    /// Returns the underlying error if the request fails or is rejected.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let response = self
            .client
            .post(self.config.auth_url("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(CloudError::from)?;

        if !response.status().is_success() {
            return Err(status_error(response).await.into());
        }

        let body: serde_json::Value = parse_body(response, "sign-up response").await?;
        if body.get("access_token").is_none() {
            tracing::info!("Sign-up pending e-mail confirmation");
            return Ok(SignUpOutcome::ConfirmationPending);
        }

        let token: TokenResponse = serde_json::from_value(body).map_err(|source| {
            CloudError::JsonParse { context: "sign-up session".to_owned(), source }
        })?;
        let session = token.into_session();
        let user = session.current_user();
        self.install(Some(session)).await?;
        Ok(SignUpOutcome::SignedIn(user))
    }

    /// Revoke the session remotely and forget it locally.
    ///
    /// The local session is cleared even when the remote call fails.
    ///
    /// # Errors
    /// Returns an error if the local session could not be cleared.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.session.lock().await.as_ref().map(|s| s.access_token.clone());
        if let Some(token) = token {
            let result = self
                .client
                .post(self.config.auth_url("logout"))
                .header("apikey", &self.config.anon_key)
                .bearer_auth(token)
                .send()
                .await;
            match result {
                Ok(r) if r.status().is_success() => {},
                Ok(r) => tracing::warn!(status = r.status().as_u16(), "Remote sign-out rejected"),
                Err(e) => tracing::warn!(error = %e, "Remote sign-out failed"),
            }
        }
        self.install(None).await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredSession, AuthError> {
        #[derive(Serialize)]
        struct RefreshBody<'a> {
            refresh_token: &'a str,
        }

        let response = self
            .client
            .post(self.config.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.config.anon_key)
            .json(&RefreshBody { refresh_token })
            .send()
            .await
            .map_err(CloudError::from)?;

        if !response.status().is_success() {
            return Err(status_error(response).await.into());
        }
        let token: TokenResponse = parse_body(response, "refresh response").await?;
        Ok(token.into_session())
    }

    async fn install(&self, session: Option<StoredSession>) -> Result<(), AuthError> {
        let mut guard = self.session.lock().await;
        match session {
            Some(ref s) => self.local.store_value(AUTH_SESSION_KEY, s)?,
            None => self.local.remove(AUTH_SESSION_KEY)?,
        }
        let user = session.as_ref().map(StoredSession::current_user);
        *guard = session;
        drop(guard);
        self.tx.send_replace(user);
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for PasswordAuth {
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        let stored = self.session.lock().await.clone();
        let Some(stored) = stored else {
            return Ok(None);
        };
        if !stored.is_expired(now_millis()) {
            return Ok(Some(stored.current_user()));
        }

        let Some(refresh_token) = stored.refresh_token.as_deref() else {
            return Err(AuthError::SessionExpired);
        };
        tracing::debug!(user_id = %stored.user.id, "Refreshing expired access token");
        match self.refresh(refresh_token).await {
            Ok(fresh) => {
                let user = fresh.current_user();
                self.install(Some(fresh)).await?;
                Ok(Some(user))
            },
            Err(AuthError::Cloud(e)) if e.is_unauthorized() || matches!(e, CloudError::HttpStatus { code: 400, .. }) => {
                tracing::warn!(error = %e, "Refresh token rejected, signing out");
                self.install(None).await?;
                Err(AuthError::SessionExpired)
            },
            Err(e) => Err(e),
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}

async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, CloudError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| CloudError::JsonParse {
        context: format!("{context} (body: {})", truncate(&body, 200)),
        source,
    })
}
