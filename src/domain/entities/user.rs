//! User entity: identity, credentials and password-reset state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account.
///
/// `password_reset_token` holds the SHA-256 digest of the outstanding reset
/// token, never the raw token. It is set together with
/// `password_reset_expires` and cleared together with it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if a reset token has been issued and has not yet expired at `now`.
    pub fn has_pending_reset(&self, now: DateTime<Utc>) -> bool {
        matches!(
            (&self.password_reset_token, self.password_reset_expires),
            (Some(_), Some(expires)) if expires > now
        )
    }

    /// Name shown to other people: the display name if set, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Input data for creating a new user.
///
/// `username` and `email` are expected to be normalized (trimmed, lowercase)
/// and `password_hash` already computed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: None,
            avatar_url: None,
            password_reset_token: None,
            password_reset_expires: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_pending_reset() {
        let now = Utc::now();
        let mut u = user();
        assert!(!u.has_pending_reset(now));

        u.password_reset_token = Some("digest".to_string());
        u.password_reset_expires = Some(now + Duration::minutes(10));
        assert!(u.has_pending_reset(now));

        u.password_reset_expires = Some(now);
        assert!(!u.has_pending_reset(now));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut u = user();
        assert_eq!(u.display_name(), "alice");

        u.name = Some("   ".to_string());
        assert_eq!(u.display_name(), "alice");

        u.name = Some("Alice Liddell".to_string());
        assert_eq!(u.display_name(), "Alice Liddell");
    }
}
