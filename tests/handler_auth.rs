mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use biolink_api::application::services::password_reset_service::RESET_REQUEST_ACK;
use biolink_api::infrastructure::mail::{MailError, Mailer, OutgoingEmail};
use biolink_api::infrastructure::storage::NullImageStore;
use biolink_api::state::AppState;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

fn make_server(pool: PgPool) -> (TestServer, Arc<common::RecordingMailer>) {
    let (state, mailer) = common::create_test_state(pool);
    (TestServer::new(common::api_router(state)).unwrap(), mailer)
}

// ─── REGISTER / LOGIN ────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_register_normalizes_and_hides_password(pool: PgPool) {
    let (server, _) = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "  Alice_1 ",
            "email": "Alice@Example.com",
            "password": "secret123",
            "name": "Alice"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "User registered successfully!");
    assert_eq!(body["user"]["username"], "alice_1");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[sqlx::test]
async fn test_register_duplicate(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, _) = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "fresh@example.com",
            "password": "secret123"
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["message"], "Username or email already exist!");
}

#[sqlx::test]
async fn test_register_missing_fields(pool: PgPool) {
    let (server, _) = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "alice" }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_register_invalid_username(pool: PgPool) {
    let (server, _) = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "al-ice",
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_login_and_me(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, _) = make_server(pool);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ALICE@example.com", "password": common::TEST_PASSWORD }))
        .await;

    login.assert_status_ok();
    let body = login.json::<Value>();
    assert_eq!(body["user"]["username"], "alice");
    let token = body["token"].as_str().unwrap().to_string();

    let me = server
        .get("/api/auth/me")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["email"], "alice@example.com");
}

#[sqlx::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, _) = make_server(pool);

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "wrong-password" }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_email.assert_status_unauthorized();
    assert_eq!(wrong_password.text(), unknown_email.text());
}

#[sqlx::test]
async fn test_me_requires_token(pool: PgPool) {
    let (server, _) = make_server(pool);

    let response = server.get("/api/auth/me").await;
    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");

    server
        .get("/api/auth/me")
        .add_header("Authorization", "Bearer not-a-jwt")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_me_for_deleted_user(pool: PgPool) {
    let (server, _) = make_server(pool);

    server
        .get("/api/auth/me")
        .add_header(
            "Authorization",
            common::bearer_for(uuid::Uuid::new_v4(), "ghost"),
        )
        .await
        .assert_status_not_found();
}

// ─── PASSWORD RESET ──────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_reset_flow(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool.clone());

    let response = server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], RESET_REQUEST_ACK);

    let sent = mailer.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert!(
        sent[0]
            .text
            .contains(&format!("{}/reset-password/", common::TEST_FRONTEND_URL))
    );

    let raw = mailer.last_reset_token().unwrap();
    assert_eq!(raw.len(), 64);

    let (stored, expires) = common::reset_state(&pool, user_id).await;
    assert_ne!(stored.as_deref(), Some(raw.as_str()));
    assert!(expires.is_some());

    server
        .patch(&format!("/api/auth/reset-password/{raw}"))
        .json(&json!({ "password": "brand-new-pass" }))
        .await
        .assert_status_ok();

    assert_eq!(common::reset_state(&pool, user_id).await, (None, None));

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "brand-new-pass" }))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_reset_token_cannot_be_replayed(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool);

    server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await
        .assert_status_ok();
    mailer.wait_for(1).await;
    let raw = mailer.last_reset_token().unwrap();

    server
        .patch(&format!("/api/auth/reset-password/{raw}"))
        .json(&json!({ "password": "first-new-pass" }))
        .await
        .assert_status_ok();

    let replay = server
        .patch(&format!("/api/auth/reset-password/{raw}"))
        .json(&json!({ "password": "second-new-pass" }))
        .await;

    replay.assert_status_bad_request();
    assert_eq!(
        replay.json::<Value>()["error"]["code"],
        "invalid_or_expired_token"
    );
}

#[sqlx::test]
async fn test_second_request_invalidates_first_token(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool);

    for n in 1..=2 {
        server
            .post("/api/auth/forgot-password")
            .json(&json!({ "email": "alice@example.com" }))
            .await
            .assert_status_ok();
        mailer.wait_for(n).await;
    }

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    let second = mailer.last_reset_token().unwrap();
    let first = {
        let marker = "/reset-password/";
        let start = sent[0].text.find(marker).unwrap() + marker.len();
        sent[0].text[start..start + 64].to_string()
    };
    assert_ne!(first, second);

    server
        .patch(&format!("/api/auth/reset-password/{first}"))
        .json(&json!({ "password": "brand-new-pass" }))
        .await
        .assert_status_bad_request();

    server
        .patch(&format!("/api/auth/reset-password/{second}"))
        .json(&json!({ "password": "brand-new-pass" }))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_expired_token_is_rejected(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool.clone());

    server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await
        .assert_status_ok();
    mailer.wait_for(1).await;
    let raw = mailer.last_reset_token().unwrap();

    common::expire_reset_token(&pool, user_id).await;

    let response = server
        .patch(&format!("/api/auth/reset-password/{raw}"))
        .json(&json!({ "password": "brand-new-pass" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "invalid_or_expired_token"
    );
}

#[sqlx::test]
async fn test_unknown_email_gets_identical_response(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool);

    let known = server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    let unknown = server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(known.status_code(), unknown.status_code());
    assert_eq!(known.text(), unknown.text());
    assert_eq!(mailer.wait_for(1).await.len(), 1);
}

#[sqlx::test]
async fn test_reset_rejects_short_password(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let (server, mailer) = make_server(pool.clone());

    server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await
        .assert_status_ok();
    mailer.wait_for(1).await;
    let raw = mailer.last_reset_token().unwrap();

    let response = server
        .patch(&format!("/api/auth/reset-password/{raw}"))
        .json(&json!({ "password": "123" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");

    let (stored, _) = common::reset_state(&pool, user_id).await;
    assert!(stored.is_some());
}

/// A relay that never answers.
struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), MailError> {
        std::future::pending().await
    }
}

#[sqlx::test]
async fn test_forgot_password_does_not_wait_for_delivery(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let state = AppState::new(
        Arc::new(pool.clone()),
        &common::test_config(),
        Arc::new(StalledMailer),
        Arc::new(NullImageStore::new()),
    );
    let server = TestServer::new(common::api_router(state)).unwrap();

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        server
            .post("/api/auth/forgot-password")
            .json(&json!({ "email": "alice@example.com" })),
    )
    .await
    .expect("response waited on the mail relay");

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], RESET_REQUEST_ACK);

    let (stored, _) = common::reset_state(&pool, user_id).await;
    assert!(stored.is_some());
}
