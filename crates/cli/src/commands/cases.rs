use anyhow::{Result, bail};
use legalguard_core::{
    CaseReport, CaseSubmission, CaseType, ChatSession, HistoryItem, Origin, Urgency, newest_first,
};
use legalguard_service::{HistorySnapshot, RemoteWrite};
use tokio_util::sync::CancellationToken;

use super::print_json;
use crate::app::App;

pub(crate) fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

fn report_remote_write(action: &str, remote: &RemoteWrite) {
    if let RemoteWrite::Failed(ref e) = *remote {
        eprintln!("Warning: cloud {action} failed: {e}");
    }
}

pub(crate) async fn run_analyze(
    app: &App,
    category: CaseType,
    urgency: Urgency,
    description: String,
    json: bool,
) -> Result<()> {
    let service = app.case_service()?;
    let created = service.analyze(CaseSubmission::new(category, description, urgency)).await?;
    report_remote_write("save", &created.remote);

    if json {
        return print_json(&created);
    }
    let report = &created.item.record;
    println!("Report {} ({}, {} urgency)", report.id, report.submission.category, urgency);
    println!();
    println!("{}", report.analysis.summary);
    for (key, value) in &report.analysis.details {
        println!();
        println!("{key}:");
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn print_report_line(item: &HistoryItem<CaseReport>) {
    let report = &item.record;
    println!(
        "[{}] {}  {}  {}  ({})",
        item.origin.as_str(),
        report.id,
        format_timestamp(report.timestamp),
        report.submission.category,
        report.submission.urgency,
    );
}

fn print_session_line(item: &HistoryItem<ChatSession>) {
    let session = &item.record;
    println!(
        "[{}] {}  {}  {}  ({} messages)",
        item.origin.as_str(),
        session.id,
        format_timestamp(session.timestamp),
        session.title,
        session.messages.len(),
    );
}

/// Load both stores, abandoning the load on Ctrl-C.
pub(crate) async fn load_history(app: &App) -> Option<HistorySnapshot> {
    let token = CancellationToken::new();
    let guard = token.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            guard.cancel();
        }
    });

    let snapshot = app.history.load_with_cancel(&token).await;
    interrupt.abort();

    if let Some(ref snapshot) = snapshot {
        for warning in &snapshot.warnings {
            eprintln!("Warning: {warning}");
        }
    }
    snapshot
}

pub(crate) async fn run_history(app: &App, json: bool) -> Result<()> {
    let Some(snapshot) = load_history(app).await else {
        eprintln!("History load cancelled");
        return Ok(());
    };

    if json {
        return print_json(&snapshot);
    }

    println!("Reports ({})", snapshot.reports.len());
    for item in newest_first(&snapshot.reports) {
        print_report_line(&item);
    }
    println!();
    println!("Chat sessions ({})", snapshot.chat_sessions.len());
    for item in newest_first(&snapshot.chat_sessions) {
        print_session_line(&item);
    }
    if !snapshot.signed_in {
        println!();
        println!("Showing this device only. Sign in to sync with the cloud.");
    }
    Ok(())
}

pub(crate) async fn run_delete_report(app: &App, id: &str, cloud: bool, json: bool) -> Result<()> {
    let origin = if cloud { Origin::Cloud } else { Origin::Local };
    let Some(snapshot) = load_history(app).await else {
        bail!("history load cancelled");
    };
    if !snapshot.reports.iter().any(|item| item.origin == origin && item.record.id == id) {
        bail!("no {} report with id {id}", origin.as_str());
    }

    let deleted = app.history.delete_report(id, origin).await?;
    report_remote_write("delete", &deleted.remote);

    if json {
        return print_json(&deleted);
    }
    println!("Deleted report {id}. {} reports remain.", deleted.reports.len());
    Ok(())
}

pub(crate) async fn run_clear_local(app: &App) -> Result<()> {
    app.history.clear_local_reports().await?;
    println!("Local report history cleared.");
    Ok(())
}
