//! Runtime settings read from the environment.

use std::path::PathBuf;

use crate::env_config::{env_non_empty, env_parse_with_default};

/// OpenAI-compatible endpoint of the default model provider.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
/// Default model for case analysis and Q&A.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

#[derive(Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    /// Hosted service base URL; `None` keeps the app local-only.
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub http_timeout_secs: u64,
    pub db_pool_size: u32,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("data_dir", &self.data_dir)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &self.supabase_anon_key.as_ref().map(|_| "***"))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("db_pool_size", &self.db_pool_size)
            .finish()
    }
}

impl Settings {
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = env_non_empty("LEGALGUARD_DATA_DIR").map_or_else(default_data_dir, PathBuf::from);
        Self {
            data_dir,
            api_key: env_non_empty("LEGALGUARD_API_KEY"),
            api_url: env_non_empty("LEGALGUARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            model: env_non_empty("LEGALGUARD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            supabase_url: env_non_empty("LEGALGUARD_SUPABASE_URL"),
            supabase_anon_key: env_non_empty("LEGALGUARD_SUPABASE_ANON_KEY"),
            http_timeout_secs: env_parse_with_default(
                "LEGALGUARD_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            ),
            db_pool_size: env_parse_with_default("LEGALGUARD_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE),
        }
    }

    /// Both hosted-service settings are present.
    #[must_use]
    pub fn cloud_enabled(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("legalguard.db")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("legalguard")
}
