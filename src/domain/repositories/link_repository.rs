//! Repository trait for a user's ordered links.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Why a reorder was aborted. Any of these rolls the whole reorder back.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// An entry of the submitted sequence is not a link identifier at all.
    #[error("invalid link identifier '{0}'")]
    InvalidIdentifier(String),
    /// The link does not exist or belongs to someone else.
    #[error("link {0} not found or not owned by caller")]
    NotFoundOrNotOwned(Uuid),
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Repository interface for links.
///
/// Every operation that takes a `user_id` filters by it in the statement
/// itself, so a link owned by someone else behaves exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Appends a link after the owner's current last position
    /// (position 0 for the first link).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Lists the user's links by ascending position.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Overwrites an owned link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the updated link
    /// - `Ok(None)` if not found or not owned
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: LinkUpdate,
    ) -> Result<Option<Link>, AppError>;

    /// Deletes an owned link. Sibling positions are not renumbered.
    ///
    /// Returns `Ok(false)` if not found or not owned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    /// Assigns position `i` to the link identified by `ordered_ids[i]`, all
    /// inside one transaction.
    ///
    /// Either every listed link gets its new position or nothing changes.
    /// An empty sequence succeeds without touching anything. If an
    /// identifier appears twice its last position wins.
    ///
    /// # Errors
    ///
    /// - [`ReorderError::InvalidIdentifier`] for an entry that is not a UUID
    /// - [`ReorderError::NotFoundOrNotOwned`] for an unknown or foreign link
    /// - [`ReorderError::Store`] on database errors, including transient
    ///   conflicts that outlived the retry budget
    async fn reorder(&self, user_id: Uuid, ordered_ids: Vec<String>) -> Result<(), ReorderError>;

    /// Atomically increments the click counter of any link.
    ///
    /// Returns `Ok(false)` if the link does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: Uuid) -> Result<bool, AppError>;
}
