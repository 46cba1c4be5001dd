//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer and wraps the
//! outside services the application talks to.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations and transactions
//! - [`mail`] - Outbound email (SMTP and no-op implementations)
//! - [`storage`] - Avatar image hosting (Cloudinary and no-op implementations)

pub mod mail;
pub mod persistence;
pub mod storage;
