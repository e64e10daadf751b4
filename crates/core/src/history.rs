//! Merged history view: records tagged with where they were read from.

use serde::Serialize;

use crate::{CaseReport, ChatSession};

/// Provenance of a record in the merged view.
///
/// Presentation only. Never part of a persisted representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Local,
    Cloud,
}

impl Origin {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Local => "local",
            Self::Cloud => "cloud",
        }
    }
}

/// A record paired with its origin tag.
///
/// The tag lives beside the record instead of inside it, so serializing
/// `record` for either store can never leak it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem<T> {
    pub origin: Origin,
    #[serde(flatten)]
    pub record: T,
}

impl<T> HistoryItem<T> {
    #[must_use]
    pub const fn local(record: T) -> Self {
        Self { origin: Origin::Local, record }
    }

    #[must_use]
    pub const fn cloud(record: T) -> Self {
        Self { origin: Origin::Cloud, record }
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }
}

/// Records that carry a creation timestamp.
pub trait Timestamped {
    fn id(&self) -> &str;
    fn timestamp(&self) -> i64;
}

impl Timestamped for CaseReport {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Timestamped for ChatSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Presentation re-sort, newest first. Load order is left untouched.
#[must_use]
pub fn newest_first<T: Timestamped + Clone>(items: &[HistoryItem<T>]) -> Vec<HistoryItem<T>> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(item.record.timestamp()));
    sorted
}

/// Strip origin tags, keeping only local-origin records.
#[must_use]
pub fn local_records<T: Clone>(items: &[HistoryItem<T>]) -> Vec<T> {
    items.iter().filter(|item| item.is_local()).map(|item| item.record.clone()).collect()
}
