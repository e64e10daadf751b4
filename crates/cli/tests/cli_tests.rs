use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary pointed at an empty data dir with every backend unconfigured.
fn legalguard(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("legalguard").unwrap();
    cmd.env("LEGALGUARD_DATA_DIR", data_dir.path())
        .env_remove("LEGALGUARD_API_KEY")
        .env_remove("LEGALGUARD_SUPABASE_URL")
        .env_remove("LEGALGUARD_SUPABASE_ANON_KEY")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("legalguard").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Legal-aid assistant"));
}

#[test]
fn test_cli_analyze_help() {
    let mut cmd = Command::cargo_bin("legalguard").unwrap();
    cmd.args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("urgency"));
}

#[test]
fn test_history_empty_offline() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reports (0)"))
        .stdout(predicate::str::contains("Sign in to sync"));
}

#[test]
fn test_history_json_empty() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reports\": []"))
        .stdout(predicate::str::contains("\"signed_in\": false"));
}

#[test]
fn test_theme_defaults_dark_and_toggles() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir).arg("theme").assert().success().stdout("dark\n");
    legalguard(&dir).args(["theme", "toggle"]).assert().success().stdout("light\n");
    legalguard(&dir).args(["theme", "show"]).assert().success().stdout("light\n");
}

#[test]
fn test_analyze_without_api_key_fails() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["analyze", "--category", "police", "Police refused my FIR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LEGALGUARD_API_KEY"));
}

#[test]
fn test_unknown_category_rejected() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["analyze", "--category", "parking", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown case type"));
}

#[test]
fn test_login_without_cloud_fails() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["login", "--email", "a@example.com", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hosted service not configured"));
}

#[test]
fn test_whoami_offline() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloud sync is not configured"));
}

#[test]
fn test_chat_show_empty_and_save_rejected() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["chat", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages yet"));
    legalguard(&dir)
        .args(["chat", "save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_delete_missing_report_fails() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .args(["delete-report", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no local report with id nope"));
}

#[test]
fn test_rust_log_controls_verbosity() {
    let dir = TempDir::new().unwrap();
    legalguard(&dir)
        .arg("history")
        .assert()
        .success()
        .stderr(predicate::str::contains("Local store opened").not());

    legalguard(&dir)
        .arg("history")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Local store opened"));
}

#[test]
fn test_analyze_category_defaults_to_false_case() {
    let mut cmd = Command::cargo_bin("legalguard").unwrap();
    cmd.args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: false-case]"));
}
