//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! with `mockall` for service unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts, credentials and reset tokens
//! - [`ProfileRepository`] - One profile per user, upserted
//! - [`LinkRepository`] - Ordered links, including the transactional reorder
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod profile_repository;
pub mod user_repository;

pub use link_repository::{LinkRepository, ReorderError};
pub use profile_repository::ProfileRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
