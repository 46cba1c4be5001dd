//! Link entity: one entry in a user's ordered list of links.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// How the public page renders a link.
///
/// Stored and transmitted as `link` (generic), `youtube` (video) and
/// `spotify` (audio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkType {
    #[default]
    Generic,
    Video,
    Audio,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Generic => "link",
            LinkType::Video => "youtube",
            LinkType::Audio => "spotify",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "link" => Ok(LinkType::Generic),
            "youtube" => Ok(LinkType::Video),
            "spotify" => Ok(LinkType::Audio),
            other => Err(format!("unknown link type '{}'", other)),
        }
    }
}

/// A link owned by exactly one user.
///
/// `position` is the zero-based display order within the owner's links.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub link_type: LinkType,
    pub social_platform: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new link.
///
/// The position is not part of the input: the repository appends the link
/// after the owner's current last position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub link_type: LinkType,
    pub social_platform: Option<String>,
}

/// Replacement values for an existing link.
///
/// `title`, `url` and `social_platform` are always written (a missing social
/// platform clears it). `link_type: None` keeps the stored type.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkUpdate {
    pub title: String,
    pub url: String,
    pub link_type: Option<LinkType>,
    pub social_platform: Option<String>,
}
