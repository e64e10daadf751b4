//! Shared constants for legalguard.
//!
//! Storage keys are part of the on-disk contract and must not change.

/// Local-origin case reports (JSON array of `CaseReport`).
pub const REPORTS_HISTORY_KEY: &str = "legalguard_reports_history";

/// Local-origin saved chat sessions (JSON array of `ChatSession`).
pub const CHAT_SESSIONS_KEY: &str = "legalguard_chat_sessions";

/// The single active chat transcript (JSON array of `ChatMessage`).
pub const CHAT_HISTORY_KEY: &str = "legalguard_chat_history";

/// Colour theme, `light` or `dark`.
pub const THEME_KEY: &str = "legalguard_theme";

/// Persisted hosted-service auth session.
pub const AUTH_SESSION_KEY: &str = "legalguard_auth_session";

/// Remote table holding case reports.
pub const REPORTS_TABLE: &str = "reports";

/// Remote table holding saved chat sessions.
pub const CHAT_SESSIONS_TABLE: &str = "chat_sessions";

/// Maximum number of characters kept from the first user message in a session title.
pub const SESSION_TITLE_MAX_CHARS: usize = 40;

/// Appended to a session title that was cut short.
pub const SESSION_TITLE_ELLIPSIS: &str = "...";

/// Title used when a transcript has no user message.
pub const UNTITLED_SESSION: &str = "Untitled Chat";

/// Assistant text recorded when the AI collaborator fails to answer.
pub const ASSISTANT_FALLBACK_TEXT: &str = "Error. Try again.";

/// Validation message for a blank case description.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please describe your situation in detail.";
