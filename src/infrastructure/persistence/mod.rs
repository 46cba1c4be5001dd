//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped onto `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and password-reset state
//! - [`PgProfileRepository`] - Profile upserts
//! - [`PgLinkRepository`] - Link storage, clicks and transactional reorder
//!
//! [`transaction`] holds the retrying transaction primitive the reorder is
//! built on.

pub mod pg_link_repository;
pub mod pg_profile_repository;
pub mod pg_user_repository;
pub mod transaction;

pub use pg_link_repository::PgLinkRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_user_repository::PgUserRepository;
pub use transaction::{RetryPolicy, Transient, UnitOfWork, run_in_transaction};
