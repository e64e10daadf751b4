//! Core types and traits for legalguard
//!
//! This crate contains domain types shared across all other crates.

mod chat;
pub mod constants;
mod env_config;
mod error;
mod history;
mod json_utils;
mod report;
mod settings;
mod theme;
mod user;

pub use chat::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use history::*;
pub use json_utils::{strip_code_fence, truncate};
pub use report::*;
pub use settings::Settings;
pub use theme::Theme;
pub use user::CurrentUser;

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh random record identifier (UUID v4, 122 bits of entropy).
#[must_use]
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
