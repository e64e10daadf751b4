//! Wiring: settings, stores and services for one CLI invocation.

use std::sync::Arc;

use anyhow::{Context, Result};
use legalguard_cloud::{
    CloudConfig, DisabledRemote, PasswordAuth, RemoteStore, SessionProvider, StaticSession,
    TableClient,
};
use legalguard_core::Settings;
use legalguard_llm::{LegalAdvisor, LlmClient};
use legalguard_service::{CaseService, ChatService, HistorySynchronizer, ThemeService};
use legalguard_storage::{LocalHistory, SqliteStore};

pub(crate) struct App {
    pub(crate) settings: Settings,
    local: LocalHistory,
    /// Present only when the hosted service is configured.
    auth: Option<Arc<PasswordAuth>>,
    pub(crate) session: Arc<dyn SessionProvider>,
    pub(crate) history: Arc<HistorySynchronizer>,
    advisor: Option<Arc<dyn LegalAdvisor>>,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Result<Self> {
        let db_path = settings.db_path();
        let store = SqliteStore::open(&db_path, settings.db_pool_size)
            .with_context(|| format!("opening local store at {}", db_path.display()))?;
        let local = LocalHistory::new(Arc::new(store));

        let (auth, session, remote): (Option<Arc<PasswordAuth>>, Arc<dyn SessionProvider>, Arc<dyn RemoteStore>) =
            match CloudConfig::from_settings(&settings) {
                Some(config) => {
                    let auth = Arc::new(PasswordAuth::new(config.clone(), local.clone())?);
                    let tables = Arc::new(TableClient::new(config)?);
                    (Some(auth.clone()), auth as Arc<dyn SessionProvider>, tables as Arc<dyn RemoteStore>)
                },
                None => {
                    tracing::debug!("Hosted service not configured, running local-only");
                    (None, Arc::new(StaticSession::signed_out()), Arc::new(DisabledRemote))
                },
            };

        let advisor = LlmClient::from_settings(&settings)?
            .map(|client| Arc::new(client) as Arc<dyn LegalAdvisor>);
        let history = Arc::new(HistorySynchronizer::new(local.clone(), remote, session.clone()));

        Ok(Self { settings, local, auth, session, history, advisor })
    }

    pub(crate) fn auth(&self) -> Result<&PasswordAuth> {
        self.auth.as_deref().context(
            "hosted service not configured: set LEGALGUARD_SUPABASE_URL and LEGALGUARD_SUPABASE_ANON_KEY",
        )
    }

    pub(crate) fn case_service(&self) -> Result<CaseService> {
        let advisor = self
            .advisor
            .clone()
            .context("AI endpoint not configured: set LEGALGUARD_API_KEY")?;
        Ok(CaseService::new(advisor, self.history.clone()))
    }

    pub(crate) fn chat_service(&self) -> ChatService {
        ChatService::new(self.advisor.clone(), self.local.clone(), self.history.clone())
    }

    pub(crate) fn theme_service(&self) -> ThemeService {
        ThemeService::new(self.local.clone())
    }
}
