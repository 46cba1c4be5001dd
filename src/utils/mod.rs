//! Helpers shared by the service and persistence layers.
//!
//! - [`db_error`] - Classification of database errors (unique violations, transient aborts)
//! - [`jwt`] - Access token issuance and verification
//! - [`link_url`] - Validation of link destinations
//! - [`password`] - bcrypt hashing off the async runtime

pub mod db_error;
pub mod jwt;
pub mod link_url;
pub mod password;
