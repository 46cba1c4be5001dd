//! DTOs for link management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::LinkInput;
use crate::domain::entities::Link;

/// Request body for creating or updating a link.
///
/// Presence of `title` and `url` is checked by the service so that a
/// missing field yields the same message as a blank one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub link_type: Option<String>,
    pub social_platform: Option<String>,
}

impl From<LinkRequest> for LinkInput {
    fn from(req: LinkRequest) -> Self {
        LinkInput {
            title: req.title,
            url: req.url,
            link_type: req.link_type,
            social_platform: req.social_platform,
        }
    }
}

/// Request body for `PUT /api/user/links/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub ordered_link_ids: Vec<String>,
}

/// A link as seen by its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub link_type: String,
    pub social_platform: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            title: l.title,
            url: l.url,
            order: l.position,
            link_type: l.link_type.as_str().to_string(),
            social_platform: l.social_platform,
            click_count: l.click_count,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
