//! Repository trait for user accounts and password-reset state.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Looks up a user by normalized (lowercase) email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Looks up a user by normalized (lowercase) username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Returns true if either the username or the email is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, AppError>;

    /// Stores a new avatar URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` with the updated user
    /// - `Ok(None)` if the user no longer exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> Result<Option<User>, AppError>;

    /// Records an issued reset token, replacing any outstanding one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_password_reset(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Clears both reset fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clear_password_reset(&self, id: Uuid) -> Result<(), AppError>;

    /// Finds the user holding `token_hash` whose token expires strictly after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, AppError>;

    /// Writes the new password hash and clears the reset fields, provided
    /// the stored token still equals `token_hash` and has not expired at `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the password was changed
    /// - `Ok(false)` if the token was consumed or replaced concurrently
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn complete_password_reset(
        &self,
        id: Uuid,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError>;
}
