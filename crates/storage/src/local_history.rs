//! Typed access to the fixed Local Store keys.

use std::sync::Arc;

use legalguard_core::constants::{
    CHAT_HISTORY_KEY, CHAT_SESSIONS_KEY, REPORTS_HISTORY_KEY, THEME_KEY,
};
use legalguard_core::{CaseReport, ChatMessage, ChatSession, Theme, now_millis};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Typed view over a [`KeyValueStore`].
///
/// Reads never fail: an absent key, an unreadable store or a value that does
/// not parse all yield the default, with a warning logged for the latter two.
/// Lists are decoded record by record, so one unreadable record hides only
/// itself. Appends and removals edit the stored JSON array in place and keep
/// records they cannot decode.
#[derive(Clone)]
pub struct LocalHistory {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for LocalHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalHistory").finish_non_exhaustive()
    }
}

impl LocalHistory {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Decode the JSON value under `key`, or `None` if absent or corrupt.
    #[must_use]
    pub fn load_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Local store read failed, treating as empty");
                return None;
            },
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Unparsable local data, treating as empty");
                None
            },
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    /// Returns an error if encoding or the underlying write fails.
    pub fn store_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| StorageError::Serialization { key: key.to_owned(), source })?;
        self.store.set(key, &raw)
    }

    /// Decode the JSON array under `key`, skipping records that do not parse.
    #[must_use]
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(items) = self.load_value::<Vec<Value>>(key) else {
            return Vec::new();
        };
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "Skipping unreadable local record");
                    None
                },
            })
            .collect()
    }

    fn stored_list(&self, key: &str) -> Result<StoredList, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(StoredList::Items(Vec::new()));
        };
        Ok(match serde_json::from_str(&raw) {
            Ok(items) => StoredList::Items(items),
            Err(e) => {
                tracing::warn!(key, error = %e, "Local list is not a JSON array");
                StoredList::Unreadable(raw)
            },
        })
    }

    /// Append `item` to the JSON array under `key`.
    ///
    /// A stored value that is not an array is first copied to
    /// `{key}.corrupt.{millis}` and then replaced by a fresh list.
    ///
    /// # Errors
    /// Returns an error if the read, the encoding or a write fails. Nothing
    /// is written when the read fails.
    pub fn append_to_list<T: Serialize>(&self, key: &str, item: &T) -> Result<(), StorageError> {
        let mut items = match self.stored_list(key)? {
            StoredList::Items(items) => items,
            StoredList::Unreadable(raw) => {
                let backup = format!("{key}.corrupt.{}", now_millis());
                self.store.set(&backup, &raw)?;
                tracing::warn!(key, %backup, "Unreadable local list moved aside");
                Vec::new()
            },
        };
        let value = serde_json::to_value(item)
            .map_err(|source| StorageError::Serialization { key: key.to_owned(), source })?;
        items.push(value);
        self.store_value(key, &items)
    }

    /// Remove every record whose `id` equals `id` from the array under `key`.
    ///
    /// Returns how many records were removed. An unreadable value is left
    /// untouched.
    ///
    /// # Errors
    /// Returns an error if the read or the write fails.
    pub fn remove_from_list(&self, key: &str, id: &str) -> Result<usize, StorageError> {
        let StoredList::Items(mut items) = self.stored_list(key)? else {
            return Ok(0);
        };
        let before = items.len();
        items.retain(|item| !has_id(item, id));
        let removed = before - items.len();
        if removed > 0 {
            self.store_value(key, &items)?;
        }
        Ok(removed)
    }

    /// Delete `key`.
    ///
    /// # Errors
    /// Returns an error if the underlying delete fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key)
    }

    #[must_use]
    pub fn reports(&self) -> Vec<CaseReport> {
        self.load_list(REPORTS_HISTORY_KEY)
    }

    /// # Errors
    /// Returns an error if the read or the write fails.
    pub fn append_report(&self, report: &CaseReport) -> Result<(), StorageError> {
        self.append_to_list(REPORTS_HISTORY_KEY, report)
    }

    /// # Errors
    /// Returns an error if the read or the write fails.
    pub fn remove_report(&self, id: &str) -> Result<usize, StorageError> {
        self.remove_from_list(REPORTS_HISTORY_KEY, id)
    }

    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_reports(&self, reports: &[CaseReport]) -> Result<(), StorageError> {
        self.store_value(REPORTS_HISTORY_KEY, reports)
    }

    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear_reports(&self) -> Result<(), StorageError> {
        self.remove(REPORTS_HISTORY_KEY)
    }

    #[must_use]
    pub fn chat_sessions(&self) -> Vec<ChatSession> {
        self.load_list(CHAT_SESSIONS_KEY)
    }

    /// # Errors
    /// Returns an error if the read or the write fails.
    pub fn append_chat_session(&self, session: &ChatSession) -> Result<(), StorageError> {
        self.append_to_list(CHAT_SESSIONS_KEY, session)
    }

    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_chat_sessions(&self, sessions: &[ChatSession]) -> Result<(), StorageError> {
        self.store_value(CHAT_SESSIONS_KEY, sessions)
    }

    /// The active chat transcript.
    #[must_use]
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.load_list(CHAT_HISTORY_KEY)
    }

    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_transcript(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        self.store_value(CHAT_HISTORY_KEY, messages)
    }

    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear_transcript(&self) -> Result<(), StorageError> {
        self.remove(CHAT_HISTORY_KEY)
    }

    /// Stored theme. The theme is kept as a bare string, not JSON.
    #[must_use]
    pub fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Unknown stored theme, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Theme read failed, using default");
                Theme::default()
            },
        }
    }

    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(THEME_KEY, theme.as_str())
    }
}

enum StoredList {
    Items(Vec<Value>),
    /// Raw value that is not a JSON array.
    Unreadable(String),
}

/// Ids may be stored as strings or, for rows copied from the server, numbers.
fn has_id(item: &Value, id: &str) -> bool {
    match item.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
