//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod avatar;
pub mod health;
pub mod links;
pub mod profile;

pub use auth::{
    forgot_password_handler, login_handler, me_handler, register_handler, reset_password_handler,
};
pub use avatar::upload_avatar_handler;
pub use health::{health_handler, ping_handler};
pub use links::{
    click_handler, create_link_handler, delete_link_handler, list_links_handler,
    reorder_links_handler, update_link_handler,
};
pub use profile::{get_my_profile_handler, public_profile_handler, update_my_profile_handler};
