use std::sync::Arc;

use legalguard_core::constants::AUTH_SESSION_KEY;
use legalguard_storage::{KeyValueStore, LocalHistory, MemoryStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{AuthError, CloudConfig, PasswordAuth, SessionProvider, SignUpOutcome};

fn token_body(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": {"id": "user-1", "email": "asha@example.in"}
    })
}

fn auth_with_store(server: &MockServer) -> (PasswordAuth, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let auth =
        PasswordAuth::new(CloudConfig::new(server.uri(), "anon"), LocalHistory::new(store.clone()))
            .unwrap();
    (auth, store)
}

#[tokio::test]
async fn sign_in_persists_and_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon"))
        .and(body_json(json!({"email": "asha@example.in", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("jwt-1")))
        .expect(1)
        .mount(&server)
        .await;

    let (auth, store) = auth_with_store(&server);
    let mut rx = auth.subscribe();
    assert!(auth.current_user().await.unwrap().is_none());

    let user = auth.sign_in("asha@example.in", "pw").await.unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(user.access_token, "jwt-1");

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().as_ref().map(|u| u.id.clone()), Some("user-1".to_owned()));
    assert!(store.get(AUTH_SESSION_KEY).unwrap().is_some());
    assert_eq!(auth.current_user().await.unwrap(), Some(user));
}

#[tokio::test]
async fn session_restored_on_construction() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with_entries([(
        AUTH_SESSION_KEY,
        json!({
            "access_token": "jwt-saved",
            "refresh_token": "r",
            "expires_at": null,
            "user": {"id": "user-9", "email": null}
        })
        .to_string(),
    )]));
    let auth =
        PasswordAuth::new(CloudConfig::new(server.uri(), "anon"), LocalHistory::new(store)).unwrap();

    let user = auth.current_user().await.unwrap().unwrap();
    assert_eq!(user.id, "user-9");
    assert_eq!(user.access_token, "jwt-saved");
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
        )
        .mount(&server)
        .await;

    let (auth, store) = auth_with_store(&server);
    let err = auth.sign_in("asha@example.in", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(ref msg) if msg.contains("Invalid login")));
    assert!(store.get(AUTH_SESSION_KEY).unwrap().is_none());
}

#[tokio::test]
async fn sign_up_without_session_needs_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "user-2", "email": "new@example.in", "confirmation_sent_at": "2026-01-01T00:00:00Z"})),
        )
        .mount(&server)
        .await;

    let (auth, _store) = auth_with_store(&server);
    let outcome = auth.sign_up("new@example.in", "pw").await.unwrap();
    assert_eq!(outcome, SignUpOutcome::ConfirmationPending);
    assert!(auth.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_up_with_session_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("jwt-new")))
        .mount(&server)
        .await;

    let (auth, _store) = auth_with_store(&server);
    let outcome = auth.sign_up("asha@example.in", "pw").await.unwrap();
    assert!(matches!(outcome, SignUpOutcome::SignedIn(ref u) if u.access_token == "jwt-new"));
}

#[tokio::test]
async fn sign_out_clears_even_when_remote_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("jwt-1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (auth, store) = auth_with_store(&server);
    auth.sign_in("asha@example.in", "pw").await.unwrap();
    auth.sign_out().await.unwrap();

    assert!(auth.current_user().await.unwrap().is_none());
    assert!(store.get(AUTH_SESSION_KEY).unwrap().is_none());
    assert!(auth.subscribe().borrow().is_none());
}

#[tokio::test]
async fn expired_session_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({"refresh_token": "old-refresh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("jwt-fresh")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_entries([(
        AUTH_SESSION_KEY,
        json!({
            "access_token": "jwt-stale",
            "refresh_token": "old-refresh",
            "expires_at": 1,
            "user": {"id": "user-1", "email": null}
        })
        .to_string(),
    )]));
    let auth = PasswordAuth::new(CloudConfig::new(server.uri(), "anon"), LocalHistory::new(store))
        .unwrap();

    let user = auth.current_user().await.unwrap().unwrap();
    assert_eq!(user.access_token, "jwt-fresh");
}

#[tokio::test]
async fn rejected_refresh_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid Refresh Token"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_entries([(
        AUTH_SESSION_KEY,
        json!({
            "access_token": "jwt-stale",
            "refresh_token": "revoked",
            "expires_at": 1,
            "user": {"id": "user-1", "email": null}
        })
        .to_string(),
    )]));
    let auth =
        PasswordAuth::new(CloudConfig::new(server.uri(), "anon"), LocalHistory::new(store.clone()))
            .unwrap();

    let err = auth.current_user().await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
    assert!(store.get(AUTH_SESSION_KEY).unwrap().is_none());
    assert!(auth.current_user().await.unwrap().is_none());
}
