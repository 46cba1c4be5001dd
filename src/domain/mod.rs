//! Domain layer containing business entities and logic.
//!
//! Nothing in here depends on the infrastructure or presentation layers.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`password_reset`] - Reset token issuance and hashing
//!
//! Business workflows live in [`crate::application::services`].

pub mod entities;
pub mod password_reset;
pub mod repositories;
