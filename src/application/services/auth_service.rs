//! Registration, login and access-token verification.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtKeys};
use crate::utils::password::{hash_password, verify_password};

const DUPLICATE_ACCOUNT: &str = "Username or email already exist!";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration input. Username and email are expected to be normalized
/// and validated already.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub user: User,
}

/// Service for account creation and Bearer-token authentication.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    keys: JwtKeys,
    bcrypt_cost: u32,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, keys: JwtKeys, bcrypt_cost: u32) -> Self {
        Self {
            users,
            keys,
            bcrypt_cost,
        }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or email is taken,
    /// including when a concurrent registration wins the race to the unique
    /// constraint.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        if self
            .users
            .exists_by_username_or_email(&registration.username, &registration.email)
            .await?
        {
            return Err(AppError::bad_request(DUPLICATE_ACCOUNT, json!({})));
        }

        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;

        let user = self
            .users
            .create(NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                name: registration.name,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::bad_request(DUPLICATE_ACCOUNT, json!({})),
                other => other,
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message whether the
    /// email is unknown or the password is wrong.
    /// Returns [`AppError::Internal`] on hashing, signing or database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS, json!({})));
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS, json!({})));
        }

        let token = self
            .keys
            .issue(user.id, &user.username, Utc::now())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                AppError::internal("Server error", json!({}))
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginSession { token, user })
    }

    /// Verifies an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.keys.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })
    }

    /// Loads the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn current_user(&self, user_id: uuid::Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))
    }
}
