//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so both hashing and verification run on the
//! blocking thread pool instead of a runtime worker.

use serde_json::json;
use thiserror::Error;

use crate::error::AppError;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Server error", json!({}))
    }
}

/// Hashes `password` with a fresh per-record salt.
///
/// # Errors
///
/// Returns [`PasswordError`] if bcrypt rejects the cost or the task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Checks `password` against a stored bcrypt hash.
///
/// # Errors
///
/// Returns [`PasswordError`] if the stored hash is malformed or the task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(ok)
}

/// Returns true if `password` is long enough to be accepted.
pub fn is_acceptable(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret123".to_string(), 4).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("secret123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("secret123".to_string(), 4).await.unwrap();
        let b = hash_password("secret123".to_string(), 4).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x".to_string(), "not-a-hash".to_string())
            .await
            .is_err());
    }

    #[test]
    fn test_is_acceptable() {
        assert!(!is_acceptable("12345"));
        assert!(is_acceptable("123456"));
    }
}
