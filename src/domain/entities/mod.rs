//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Read models (`User`, `Profile`, `Link`)
//! mirror stored rows; input types carry data for writes:
//!
//! - `NewUser`, `NewLink` - For creating new records
//! - `ProfilePatch`, `LinkUpdate` - For updates, where `None` means "leave unchanged"
//!
//! Nothing here serializes directly to HTTP responses; the API layer maps
//! entities onto DTOs so secrets such as the password hash never leave the
//! process by accident.

pub mod link;
pub mod profile;
pub mod user;

pub use link::{Link, LinkType, LinkUpdate, NewLink};
pub use profile::{ButtonStyle, Profile, ProfilePatch};
pub use user::{NewUser, User};
