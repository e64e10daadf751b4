use legalguard_core::constants::{CHAT_SESSIONS_KEY, REPORTS_HISTORY_KEY, THEME_KEY};
use legalguard_core::{CaseType, ChatMessage, ChatSession, Theme};
use serde_json::json;

use super::{create_test_report, create_test_store, memory_history};
use crate::KeyValueStore;

#[test]
fn empty_store_reads_defaults() {
    let (history, _store) = memory_history();
    assert!(history.reports().is_empty());
    assert!(history.chat_sessions().is_empty());
    assert!(history.transcript().is_empty());
    assert_eq!(history.theme(), Theme::Dark);
}

#[test]
fn corrupt_reports_read_as_empty() {
    let (history, store) = memory_history();
    store.set(REPORTS_HISTORY_KEY, "{not json").unwrap();
    assert!(history.reports().is_empty());
}

#[test]
fn wrong_shape_reads_as_empty() {
    let (history, store) = memory_history();
    store.set(CHAT_SESSIONS_KEY, r#"{"id": "not-an-array"}"#).unwrap();
    assert!(history.chat_sessions().is_empty());
}

#[test]
fn reports_round_trip_in_order() {
    let (history, store) = memory_history();
    let reports = vec![create_test_report("r1", 1), create_test_report("r2", 2)];
    history.save_reports(&reports).unwrap();
    assert_eq!(history.reports(), reports);

    let raw = store.get(REPORTS_HISTORY_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
    assert!(!raw.contains("origin"));
}

#[test]
fn clear_reports_removes_key() {
    let (history, store) = memory_history();
    history.save_reports(&[create_test_report("r1", 1)]).unwrap();
    history.clear_reports().unwrap();
    assert_eq!(store.get(REPORTS_HISTORY_KEY).unwrap(), None);
}

#[test]
fn transcript_round_trip_and_clear() {
    let (history, _store) = memory_history();
    let messages = vec![ChatMessage::user("Is a verbal will valid?"), ChatMessage::assistant("Rarely.")];
    history.save_transcript(&messages).unwrap();
    assert_eq!(history.transcript(), messages);
    history.clear_transcript().unwrap();
    assert!(history.transcript().is_empty());
}

#[test]
fn sessions_round_trip() {
    let (history, _store) = memory_history();
    let session = ChatSession::from_messages(vec![ChatMessage::user("Bail for a minor offence")]);
    history.save_chat_sessions(std::slice::from_ref(&session)).unwrap();
    assert_eq!(history.chat_sessions(), vec![session]);
}

#[test]
fn theme_stored_as_bare_string() {
    let (history, store) = memory_history();
    history.save_theme(Theme::Light).unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    assert_eq!(history.theme(), Theme::Light);
}

#[test]
fn unknown_theme_falls_back_to_dark() {
    let (history, store) = memory_history();
    store.set(THEME_KEY, "sepia").unwrap();
    assert_eq!(history.theme(), Theme::Dark);
}

fn stored_ids(store: &crate::MemoryStore, key: &str) -> Vec<serde_json::Value> {
    let raw = store.get(key).unwrap().unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    items.into_iter().map(|item| item["id"].clone()).collect()
}

#[test]
fn unreadable_record_hides_only_itself() {
    let (history, store) = memory_history();
    let good = serde_json::to_value(create_test_report("r1", 1)).unwrap();
    let raw = json!([good, {"id": "broken", "timestamp": "yesterday"}]);
    store.set(REPORTS_HISTORY_KEY, &raw.to_string()).unwrap();

    let reports = history.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, "r1");
}

#[test]
fn unlisted_category_still_loads() {
    let (history, store) = memory_history();
    let mut record = serde_json::to_value(create_test_report("r1", 1)).unwrap();
    record["submission"]["type"] = json!("Labour Dispute");
    store.set(REPORTS_HISTORY_KEY, &json!([record]).to_string()).unwrap();

    let reports = history.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].submission.category,
        CaseType::Unlisted("Labour Dispute".to_owned())
    );
}

#[test]
fn append_keeps_unreadable_records() {
    let (history, store) = memory_history();
    let good = serde_json::to_value(create_test_report("r1", 1)).unwrap();
    let raw = json!([good, {"id": 7, "note": "written by an older client"}]);
    store.set(REPORTS_HISTORY_KEY, &raw.to_string()).unwrap();

    history.append_report(&create_test_report("r2", 2)).unwrap();

    assert_eq!(stored_ids(&store, REPORTS_HISTORY_KEY), [json!("r1"), json!(7), json!("r2")]);
}

#[test]
fn append_moves_non_array_aside() {
    let (store, _dir) = create_test_store();
    let store = std::sync::Arc::new(store);
    let history = crate::LocalHistory::new(store.clone());
    store.set(REPORTS_HISTORY_KEY, "{not json").unwrap();

    history.append_report(&create_test_report("r1", 1)).unwrap();

    let raw = store.get(REPORTS_HISTORY_KEY).unwrap().unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(items[0]["id"], "r1");

    let backup_prefix = format!("{REPORTS_HISTORY_KEY}.corrupt.");
    let backups: Vec<_> =
        store.keys().unwrap().into_iter().filter(|k| k.starts_with(&backup_prefix)).collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(store.get(&backups[0]).unwrap().as_deref(), Some("{not json"));
}

#[test]
fn remove_keeps_other_records() {
    let (history, store) = memory_history();
    let good = serde_json::to_value(create_test_report("r1", 1)).unwrap();
    let raw = json!([good, {"id": "odd"}, {"id": 42}]);
    store.set(REPORTS_HISTORY_KEY, &raw.to_string()).unwrap();

    assert_eq!(history.remove_report("r1").unwrap(), 1);
    assert_eq!(stored_ids(&store, REPORTS_HISTORY_KEY), [json!("odd"), json!(42)]);
    assert_eq!(history.remove_report("42").unwrap(), 1);
    assert_eq!(stored_ids(&store, REPORTS_HISTORY_KEY), [json!("odd")]);
}

#[test]
fn remove_leaves_unreadable_value_alone() {
    let (history, store) = memory_history();
    store.set(REPORTS_HISTORY_KEY, "{not json").unwrap();

    assert_eq!(history.remove_report("r1").unwrap(), 0);
    assert_eq!(store.get(REPORTS_HISTORY_KEY).unwrap().as_deref(), Some("{not json"));
}
