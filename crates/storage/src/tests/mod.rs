//! Test utilities and module declarations for storage tests.

use std::sync::Arc;

use legalguard_core::{CaseReport, CaseSubmission, CaseType, LegalAnalysis, Urgency};
use tempfile::TempDir;

use crate::{LocalHistory, MemoryStore, SqliteStore};

pub fn create_test_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("test.db");
    let store = SqliteStore::open(&db_path, 2).unwrap();
    (store, temp_dir)
}

pub fn memory_history() -> (LocalHistory, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (LocalHistory::new(store.clone()), store)
}

pub fn create_test_report(id: &str, timestamp: i64) -> CaseReport {
    CaseReport {
        id: id.to_owned(),
        timestamp,
        submission: CaseSubmission::new(
            CaseType::PropertyDispute,
            format!("Neighbour encroached on plot ({id})"),
            Urgency::Medium,
        ),
        analysis: LegalAnalysis::new(format!("Summary for {id}")),
    }
}

mod local_history_tests;
