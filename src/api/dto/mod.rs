//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request DTOs use validator for
//! input checks; response DTOs are built from domain entities and never
//! carry password hashes or reset-token state.

pub mod auth;
pub mod health;
pub mod links;
pub mod message;
pub mod profile;
pub mod public_profile;
pub mod user;
