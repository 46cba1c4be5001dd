//! DTO for the public profile page.
//!
//! Only presentation fields are exposed: no email, no click counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::PublicProfile;

#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub user: PublicUser,
    pub profile: Option<PublicProfileSettings>,
    pub links: Vec<PublicLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileSettings {
    pub bio: Option<String>,
    pub theme_color: String,
    pub button_style: String,
    pub selected_theme_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLink {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub link_type: String,
    pub social_platform: Option<String>,
}

impl From<PublicProfile> for PublicProfileResponse {
    fn from(p: PublicProfile) -> Self {
        Self {
            user: PublicUser {
                username: p.user.username,
                name: p.user.name,
                avatar_url: p.user.avatar_url,
                created_at: p.user.created_at,
            },
            profile: p.profile.map(|profile| PublicProfileSettings {
                bio: profile.bio,
                theme_color: profile.theme_color,
                button_style: profile.button_style.as_str().to_string(),
                selected_theme_id: profile.selected_theme_id,
            }),
            links: p
                .links
                .into_iter()
                .map(|l| PublicLink {
                    id: l.id,
                    title: l.title,
                    url: l.url,
                    link_type: l.link_type.as_str().to_string(),
                    social_platform: l.social_platform,
                })
                .collect(),
        }
    }
}
