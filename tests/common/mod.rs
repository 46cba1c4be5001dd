#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, middleware};
use biolink_api::api::middleware::auth;
use biolink_api::api::routes::{auth_routes, protected_routes, public_routes};
use biolink_api::config::Config;
use biolink_api::infrastructure::mail::{MailError, Mailer, OutgoingEmail};
use biolink_api::infrastructure::storage::NullImageStore;
use biolink_api::state::AppState;
use biolink_api::utils::jwt::JwtKeys;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_FRONTEND_URL: &str = "http://localhost:5173";

/// Keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits until at least `count` messages were sent. Reset emails are
    /// delivered by a background task after the response.
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
        for _ in 0..200 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("expected {count} emails, got {}", self.sent().len());
    }

    /// Raw token from the most recent reset email.
    pub fn last_reset_token(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let email = sent.last()?;
        let marker = "/reset-password/";
        let start = email.text.find(marker)? + marker.len();
        Some(
            email.text[start..]
                .chars()
                .take_while(|c| c.is_ascii_hexdigit())
                .collect(),
        )
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: false,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_ttl_seconds: 3600,
        password_reset_ttl_minutes: 10,
        bcrypt_cost: 4,
        frontend_url: TEST_FRONTEND_URL.to_string(),
        smtp: None,
        cloudinary: None,
        tx_max_retries: 3,
        db_max_connections: 5,
        db_connect_timeout: 5,
        db_idle_timeout: 60,
        db_max_lifetime: 300,
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(
        Arc::new(pool),
        &test_config(),
        mailer.clone(),
        Arc::new(NullImageStore::new()),
    );
    (state, mailer)
}

/// All API routes with authentication but without rate limiting, which
/// needs a peer address the in-memory transport does not provide.
pub fn api_router(state: AppState) -> Router {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api = Router::new()
        .merge(protected)
        .merge(auth_routes())
        .merge(public_routes());

    Router::new().nest("/api", api).with_state(state)
}

pub fn bearer_for(user_id: Uuid, username: &str) -> String {
    let token = JwtKeys::new(TEST_JWT_SECRET, Duration::hours(1))
        .issue(user_id, username, Utc::now())
        .unwrap();
    format!("Bearer {token}")
}

/// Inserts a user whose password is [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    let hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, name) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(hash)
    .bind(format!("{username} display"))
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn create_test_link(pool: &PgPool, user_id: Uuid, title: &str, position: i32) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO links (id, user_id, title, url, position) VALUES ($1, $2, $3, $4, $5)")
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(format!("https://example.com/{}", title.to_lowercase()))
        .bind(position)
        .execute(pool)
        .await
        .unwrap();

    id
}

pub async fn link_position(pool: &PgPool, link_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT position FROM links WHERE id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn click_count(pool: &PgPool, link_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn reset_state(pool: &PgPool, user_id: Uuid) -> (Option<String>, Option<DateTime<Utc>>) {
    sqlx::query_as("SELECT password_reset_token, password_reset_expires FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn password_hash(pool: &PgPool, user_id: Uuid) -> String {
    sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Moves a pending reset token's expiry into the past.
pub async fn expire_reset_token(pool: &PgPool, user_id: Uuid) {
    sqlx::query(
        "UPDATE users SET password_reset_expires = NOW() - INTERVAL '1 minute' WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
}
