//! Service layer for legalguard
//!
//! The history synchronizer plus the case, chat and theme services the
//! presentation layer drives.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod case_service;
mod chat_service;
mod error;
mod history;
#[cfg(test)]
mod test_support;
mod theme_service;

pub use case_service::CaseService;
pub use chat_service::ChatService;
pub use error::ServiceError;
pub use history::{
    ChatSaveOutcome, CreatedReport, DeletedReport, HistorySnapshot, HistorySynchronizer,
    RemoteWrite, SyncWarning,
};
pub use theme_service::ThemeService;
