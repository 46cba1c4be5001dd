//! Link management: CRUD, click counting and reordering.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::link::MAX_TITLE_CHARS;
use crate::domain::entities::{Link, LinkType, LinkUpdate, NewLink};
use crate::domain::repositories::{LinkRepository, ReorderError};
use crate::error::AppError;
use crate::utils::link_url::validate_link_url;

/// Link fields as submitted. Title and URL are required on both create and
/// update; the rest are optional.
#[derive(Debug, Clone, Default)]
pub struct LinkInput {
    pub title: Option<String>,
    pub url: Option<String>,
    pub link_type: Option<String>,
    pub social_platform: Option<String>,
}

struct ValidatedLink {
    title: String,
    url: String,
    link_type: Option<LinkType>,
    social_platform: Option<String>,
}

/// Service for a user's ordered links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Lists the user's links by position.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, user_id: Uuid) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_user(user_id).await
    }

    /// Appends a link to the end of the user's list.
    ///
    /// An unrecognized link type falls back to a generic link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title or URL is missing or invalid.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(&self, user_id: Uuid, input: LinkInput) -> Result<Link, AppError> {
        let link = validate(user_id, input)?;

        let created = self
            .link_repository
            .create(NewLink {
                user_id,
                title: link.title,
                url: link.url,
                link_type: link.link_type.unwrap_or_default(),
                social_platform: link.social_platform,
            })
            .await?;

        tracing::debug!(%user_id, link_id = %created.id, position = created.position, "Link created");
        Ok(created)
    }

    /// Overwrites one of the user's links.
    ///
    /// An unrecognized link type keeps the stored type. A missing social
    /// platform clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed id, or a missing or
    /// invalid title or URL.
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs
    /// to someone else.
    pub async fn update_link(
        &self,
        user_id: Uuid,
        link_id: &str,
        input: LinkInput,
    ) -> Result<Link, AppError> {
        let id = parse_link_id(link_id)?;
        let link = validate(user_id, input)?;

        self.link_repository
            .update(
                id,
                user_id,
                LinkUpdate {
                    title: link.title,
                    url: link.url,
                    link_type: link.link_type,
                    social_platform: link.social_platform,
                },
            )
            .await?
            .ok_or_else(not_found_or_not_owned)
    }

    /// Deletes one of the user's links. Remaining positions are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed id.
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs
    /// to someone else.
    pub async fn delete_link(&self, user_id: Uuid, link_id: &str) -> Result<(), AppError> {
        let id = parse_link_id(link_id)?;

        if !self.link_repository.delete(id, user_id).await? {
            return Err(not_found_or_not_owned());
        }

        tracing::debug!(%user_id, link_id = %id, "Link deleted");
        Ok(())
    }

    /// Gives `ordered_ids[i]` position `i`, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] for any failure, with a message that
    /// does not reveal which entry was at fault. Nothing is changed in that case.
    pub async fn reorder_links(
        &self,
        user_id: Uuid,
        ordered_ids: Vec<String>,
    ) -> Result<(), AppError> {
        let count = ordered_ids.len();

        match self.link_repository.reorder(user_id, ordered_ids).await {
            Ok(()) => {
                tracing::info!(%user_id, count, "Links reordered");
                Ok(())
            }
            Err(e) => {
                metrics::counter!("link_reorders_failed_total").increment(1);
                match &e {
                    ReorderError::InvalidIdentifier(_) | ReorderError::NotFoundOrNotOwned(_) => {
                        tracing::warn!(%user_id, error = %e, "Reorder rejected, rolled back");
                    }
                    ReorderError::Store(_) => {
                        tracing::error!(%user_id, error = %e, "Reorder failed, rolled back");
                    }
                }
                Err(AppError::internal("Server error reordering links", json!({})))
            }
        }
    }

    /// Counts a visit to any link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed id.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn record_click(&self, link_id: &str) -> Result<(), AppError> {
        let id = parse_link_id(link_id)?;

        if !self.link_repository.increment_clicks(id).await? {
            return Err(AppError::not_found("Link not found", json!({})));
        }

        Ok(())
    }
}

fn parse_link_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request("Invalid Link ID format", json!({ "link_id": raw })))
}

fn not_found_or_not_owned() -> AppError {
    AppError::not_found("Link not found or user not authorized", json!({}))
}

fn validate(user_id: Uuid, input: LinkInput) -> Result<ValidatedLink, AppError> {
    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let url = input.url.filter(|u| !u.trim().is_empty());

    let (Some(title), Some(url)) = (title, url) else {
        return Err(AppError::bad_request("Title and URL are required", json!({})));
    };

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::bad_request(
            format!("Title cannot be more than {} characters", MAX_TITLE_CHARS),
            json!({ "max_length": MAX_TITLE_CHARS }),
        ));
    }

    let url = validate_link_url(&url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    let link_type = input
        .link_type
        .and_then(|raw| match raw.parse::<LinkType>() {
            Ok(t) => Some(t),
            Err(reason) => {
                tracing::warn!(%user_id, %reason, "Ignoring invalid link type");
                None
            }
        });

    let social_platform = input
        .social_platform
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    Ok(ValidatedLink {
        title,
        url,
        link_type,
        social_platform,
    })
}
