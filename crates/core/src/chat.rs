//! Chat transcripts and saved chat sessions.

use serde::{Deserialize, Serialize};

use crate::constants::{SESSION_TITLE_ELLIPSIS, SESSION_TITLE_MAX_CHARS, UNTITLED_SESSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into(), timestamp: crate::now_millis() }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into(), timestamp: crate::now_millis() }
    }
}

/// A transcript the user explicitly saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// Milliseconds since the Unix epoch, assigned at save time.
    pub timestamp: i64,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Build a session from a transcript: fresh id, derived title, stamped now.
    #[must_use]
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            id: crate::new_record_id(),
            title: session_title(&messages),
            timestamp: crate::now_millis(),
            messages,
        }
    }
}

/// Title for a saved session, taken from the first user message.
///
/// Longer than [`SESSION_TITLE_MAX_CHARS`] characters is cut there and
/// suffixed with [`SESSION_TITLE_ELLIPSIS`].
#[must_use]
pub fn session_title(messages: &[ChatMessage]) -> String {
    let first = messages
        .iter()
        .find(|m| m.role == ChatRole::User)
        .map_or(UNTITLED_SESSION, |m| m.text.as_str());

    if first.chars().count() > SESSION_TITLE_MAX_CHARS {
        let mut title: String = first.chars().take(SESSION_TITLE_MAX_CHARS).collect();
        title.push_str(SESSION_TITLE_ELLIPSIS);
        title
    } else {
        first.to_owned()
    }
}
