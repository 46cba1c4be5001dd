//! Profile editing and the public profile page.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::profile::MAX_BIO_CHARS;
use crate::domain::entities::{ButtonStyle, Link, Profile, ProfilePatch, User};
use crate::domain::repositories::{LinkRepository, ProfileRepository, UserRepository};
use crate::error::AppError;

/// Raw profile changes as submitted. `None` leaves a field unchanged;
/// `selected_theme_id: Some(None)` clears the theme.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub theme_color: Option<String>,
    pub button_style: Option<String>,
    pub selected_theme_id: Option<Option<String>>,
}

/// Everything shown on a public profile page.
#[derive(Debug, Clone)]
pub struct PublicProfile {
    pub user: User,
    pub profile: Option<Profile>,
    /// Ordered by position.
    pub links: Vec<Link>,
}

pub struct ProfileService<P, U, L>
where
    P: ProfileRepository,
    U: UserRepository,
    L: LinkRepository,
{
    profiles: Arc<P>,
    users: Arc<U>,
    links: Arc<L>,
}

impl<P, U, L> ProfileService<P, U, L>
where
    P: ProfileRepository,
    U: UserRepository,
    L: LinkRepository,
{
    pub fn new(profiles: Arc<P>, users: Arc<U>, links: Arc<L>) -> Self {
        Self {
            profiles,
            users,
            links,
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has never saved a profile.
    pub async fn get_my_profile(&self, user_id: Uuid) -> Result<Profile, AppError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found", json!({})))
    }

    /// Applies `changes`, creating the profile on first save.
    ///
    /// An unrecognized button style is ignored rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the bio is too long.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_my_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Profile, AppError> {
        let bio = changes.bio.map(|b| b.trim().to_string());

        if let Some(ref bio) = bio
            && bio.chars().count() > MAX_BIO_CHARS
        {
            return Err(AppError::bad_request(
                format!("Bio cannot be more than {} characters", MAX_BIO_CHARS),
                json!({ "max_length": MAX_BIO_CHARS }),
            ));
        }

        let button_style = changes
            .button_style
            .and_then(|raw| match raw.parse::<ButtonStyle>() {
                Ok(style) => Some(style),
                Err(reason) => {
                    tracing::warn!(%user_id, %reason, "Ignoring invalid button style");
                    None
                }
            });

        let patch = ProfilePatch {
            bio,
            theme_color: changes.theme_color.map(|c| c.trim().to_string()),
            button_style,
            selected_theme_id: changes.selected_theme_id,
        };

        let profile = self.profiles.upsert(user_id, patch).await?;
        tracing::debug!(%user_id, "Profile saved");
        Ok(profile)
    }

    /// Loads the public view of a profile by username (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that username.
    pub async fn public_profile(&self, username: &str) -> Result<PublicProfile, AppError> {
        let username = username.trim().to_lowercase();

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        let profile = self.profiles.find_by_user(user.id).await?;
        let links = self.links.list_by_user(user.id).await?;

        Ok(PublicProfile {
            user,
            profile,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockLinkRepository, MockProfileRepository, MockUserRepository,
    };
    use chrono::Utc;

    type Service = ProfileService<MockProfileRepository, MockUserRepository, MockLinkRepository>;

    fn service(
        profiles: MockProfileRepository,
        users: MockUserRepository,
        links: MockLinkRepository,
    ) -> Service {
        ProfileService::new(Arc::new(profiles), Arc::new(users), Arc::new(links))
    }

    fn profile(user_id: Uuid) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            theme_color: "#ffffff".to_string(),
            button_style: ButtonStyle::RoundedLg,
            selected_theme_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_profile() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_user().returning(|_| Ok(None));

        let err = service(profiles, MockUserRepository::new(), MockLinkRepository::new())
            .get_my_profile(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_button_style_is_dropped() {
        let user_id = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_upsert()
            .withf(|_, patch| {
                patch.button_style.is_none() && patch.bio.as_deref() == Some("hello")
            })
            .times(1)
            .returning(|id, _| Ok(profile(id)));

        let changes = ProfileChanges {
            bio: Some("hello".to_string()),
            button_style: Some("pill".to_string()),
            ..Default::default()
        };

        service(profiles, MockUserRepository::new(), MockLinkRepository::new())
            .update_my_profile(user_id, changes)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_valid_button_style_and_theme_clear() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_upsert()
            .withf(|_, patch| {
                patch.button_style == Some(ButtonStyle::RoundedFull)
                    && patch.selected_theme_id == Some(None)
            })
            .times(1)
            .returning(|id, _| Ok(profile(id)));

        let changes = ProfileChanges {
            button_style: Some("rounded-full".to_string()),
            selected_theme_id: Some(None),
            ..Default::default()
        };

        service(profiles, MockUserRepository::new(), MockLinkRepository::new())
            .update_my_profile(Uuid::new_v4(), changes)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_bio_too_long() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_upsert().times(0);

        let changes = ProfileChanges {
            bio: Some("x".repeat(161)),
            ..Default::default()
        };

        let err = service(profiles, MockUserRepository::new(), MockLinkRepository::new())
            .update_my_profile(Uuid::new_v4(), changes)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_bio_is_trimmed_before_length_check() {
        let padded = format!("  {}  ", "x".repeat(MAX_BIO_CHARS));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_upsert()
            .withf(|_, patch| {
                patch
                    .bio
                    .as_deref()
                    .is_some_and(|b| b.len() == MAX_BIO_CHARS && !b.starts_with(' '))
            })
            .times(1)
            .returning(|id, _| Ok(profile(id)));

        let changes = ProfileChanges {
            bio: Some(padded),
            ..Default::default()
        };

        service(profiles, MockUserRepository::new(), MockLinkRepository::new())
            .update_my_profile(Uuid::new_v4(), changes)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_public_profile_unknown_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|u| u == "ghost")
            .times(1)
            .returning(|_| Ok(None));

        let mut links = MockLinkRepository::new();
        links.expect_list_by_user().times(0);

        let err = service(MockProfileRepository::new(), users, links)
            .public_profile("  GHOST ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
