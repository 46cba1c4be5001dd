//! Business logic services for the application layer.

pub mod auth_service;
pub mod avatar_service;
pub mod link_service;
pub mod password_reset_service;
pub mod profile_service;

pub use auth_service::{AuthService, LoginSession, Registration};
pub use avatar_service::{AvatarFile, AvatarService};
pub use link_service::{LinkInput, LinkService};
pub use password_reset_service::PasswordResetService;
pub use profile_service::{ProfileChanges, ProfileService, PublicProfile};
