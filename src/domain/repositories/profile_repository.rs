//! Repository trait for user profiles.

use crate::domain::entities::{Profile, ProfilePatch};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for profiles. A user has at most one profile.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Applies `patch` to the user's profile, creating it with column
    /// defaults if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a value violates a column constraint.
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError>;
}
