//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and business rules, and
//! expose a small API to the HTTP handlers. They depend on repository traits
//! only, so unit tests run against `mockall` mocks.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, access tokens
//! - [`services::password_reset_service::PasswordResetService`] - Reset token lifecycle
//! - [`services::profile_service::ProfileService`] - Own profile and public pages
//! - [`services::link_service::LinkService`] - Link CRUD, clicks and reordering
//! - [`services::avatar_service::AvatarService`] - Avatar uploads

pub mod services;
