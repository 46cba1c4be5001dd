//! DTOs for the caller's own profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::ProfileChanges;
use crate::domain::entities::Profile;

/// Request body for `PUT /api/user/profile/me`.
///
/// Every field is optional. `selectedThemeId` distinguishes absent (keep),
/// `null` (clear) and a value (set).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 160, message = "Bio cannot be more than 160 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 32))]
    pub theme_color: Option<String>,

    /// Unknown styles are ignored.
    pub button_style: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub selected_theme_id: Option<Option<String>>,
}

impl UpdateProfileRequest {
    /// Trims the bio and theme color so length limits apply to the stored text.
    pub fn normalized(self) -> Self {
        Self {
            bio: self.bio.map(|b| b.trim().to_string()),
            theme_color: self.theme_color.map(|c| c.trim().to_string()),
            ..self
        }
    }
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChanges {
            bio: req.bio,
            theme_color: req.theme_color,
            button_style: req.button_style,
            selected_theme_id: req.selected_theme_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub theme_color: String,
    pub button_style: String,
    pub selected_theme_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            bio: p.bio,
            theme_color: p.theme_color,
            button_style: p.button_style.as_str().to_string(),
            selected_theme_id: p.selected_theme_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_theme_presence() {
        let absent: UpdateProfileRequest = serde_json::from_str(r#"{"bio":"hi"}"#).unwrap();
        assert_eq!(absent.selected_theme_id, None);

        let cleared: UpdateProfileRequest =
            serde_json::from_str(r#"{"selectedThemeId":null}"#).unwrap();
        assert_eq!(cleared.selected_theme_id, Some(None));

        let set: UpdateProfileRequest =
            serde_json::from_str(r#"{"selectedThemeId":"sunset"}"#).unwrap();
        assert_eq!(set.selected_theme_id, Some(Some("sunset".to_string())));
    }

    #[test]
    fn test_bio_length_validated() {
        let req: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "bio": "x".repeat(161) })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_padded_bio_within_limit_after_trim() {
        let padded = format!("  {}\n", "x".repeat(160));
        let req: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "bio": padded })).unwrap();
        assert!(req.validate().is_err());

        let req = req.normalized();
        assert!(req.validate().is_ok());
        assert_eq!(req.bio.as_deref(), Some("x".repeat(160).as_str()));
    }
}
