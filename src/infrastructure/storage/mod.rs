//! Image hosting for avatars.
//!
//! Provides an [`ImageStore`] trait with two implementations:
//! - [`CloudinaryStore`] - Signed uploads to Cloudinary
//! - [`NullImageStore`] - Used when no image host is configured; every upload fails

mod cloudinary;
mod null_store;
mod service;

pub use cloudinary::CloudinaryStore;
pub use null_store::NullImageStore;
pub use service::{ImageStore, ImageUpload, StorageError};

#[cfg(test)]
pub use service::MockImageStore;
