//! Profile entity: the one-to-one presentation settings of a user.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default theme color applied when a profile is first created.
pub const DEFAULT_THEME_COLOR: &str = "#ffffff";

/// Maximum bio length in characters.
pub const MAX_BIO_CHARS: usize = 160;

/// Shape of the link buttons on the public page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    RoundedFull,
    #[default]
    RoundedLg,
    RoundedNone,
}

impl ButtonStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonStyle::RoundedFull => "rounded-full",
            ButtonStyle::RoundedLg => "rounded-lg",
            ButtonStyle::RoundedNone => "rounded-none",
        }
    }
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rounded-full" => Ok(ButtonStyle::RoundedFull),
            "rounded-lg" => Ok(ButtonStyle::RoundedLg),
            "rounded-none" => Ok(ButtonStyle::RoundedNone),
            other => Err(format!("unknown button style '{}'", other)),
        }
    }
}

/// Presentation settings for a user's public page.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub theme_color: String,
    pub button_style: ButtonStyle,
    pub selected_theme_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by the profile upsert.
///
/// `None` fields are left unchanged (or take their column default when the
/// profile is created by this update).
/// `selected_theme_id: Some(None)` clears the theme; `Some(Some(id))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub theme_color: Option<String>,
    pub button_style: Option<ButtonStyle>,
    pub selected_theme_id: Option<Option<String>>,
}

impl ProfilePatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.theme_color.is_none()
            && self.button_style.is_none()
            && self.selected_theme_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_style_parse() {
        assert_eq!(
            "rounded-full".parse::<ButtonStyle>().unwrap(),
            ButtonStyle::RoundedFull
        );
        assert_eq!(
            " rounded-none ".parse::<ButtonStyle>().unwrap(),
            ButtonStyle::RoundedNone
        );
        assert!("pill".parse::<ButtonStyle>().is_err());
        assert_eq!(ButtonStyle::default().as_str(), "rounded-lg");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());

        let patch = ProfilePatch {
            selected_theme_id: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
