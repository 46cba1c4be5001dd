//! Password-reset token primitives.
//!
//! A reset token is 32 bytes from the OS CSPRNG, hex-encoded. Only the
//! SHA-256 digest of the raw token is stored; the raw value leaves the
//! process exactly once, inside the reset email.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes in a raw reset token.
pub const RESET_TOKEN_BYTES: usize = 32;

/// Default lifetime of an issued token, counted from issuance.
pub const DEFAULT_RESET_TTL_MINUTES: i64 = 10;

/// A freshly issued reset token.
///
/// `raw` must only be handed to the mailer. `token_hash` and `expires_at`
/// are what gets persisted.
pub struct IssuedResetToken {
    pub raw: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedResetToken")
            .field("raw", &"<redacted>")
            .field("token_hash", &self.token_hash)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl IssuedResetToken {
    /// Generates a new token valid for `ttl` from `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [`getrandom::Error`] if the OS random source is unavailable.
    pub fn generate(issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, getrandom::Error> {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        getrandom::fill(&mut bytes)?;

        let raw = hex::encode(bytes);
        let token_hash = hash_reset_token(&raw);

        Ok(Self {
            raw,
            token_hash,
            expires_at: issued_at + ttl,
        })
    }
}

/// SHA-256 hex digest of a raw token, as stored in `users.password_reset_token`.
pub fn hash_reset_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
