//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use super::transaction::{RetryPolicy, Transient, run_in_transaction};
use crate::domain::entities::{Link, LinkType, LinkUpdate, NewLink};
use crate::domain::repositories::{LinkRepository, ReorderError};
use crate::error::AppError;
use crate::utils::db_error::is_transient;

#[derive(FromRow)]
struct LinkRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    url: String,
    position: i32,
    link_type: String,
    social_platform: Option<String>,
    click_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LinkRow> for Link {
    type Error = AppError;

    fn try_from(r: LinkRow) -> Result<Self, Self::Error> {
        let link_type = r.link_type.parse::<LinkType>().map_err(|e| {
            AppError::internal("Corrupt link row", json!({ "link_id": r.id, "reason": e }))
        })?;

        Ok(Link {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            url: r.url,
            position: r.position,
            link_type,
            social_platform: r.social_platform,
            click_count: r.click_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

impl Transient for ReorderError {
    fn is_transient(&self) -> bool {
        matches!(self, ReorderError::Store(e) if is_transient(e))
    }
}

/// PostgreSQL repository for links.
///
/// Creates and reorders run through [`run_in_transaction`] with this
/// repository's [`RetryPolicy`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    retry: RetryPolicy,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool and the
    /// default retry policy.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Writes position `i` to `ordered_ids[i]`, stopping at the first entry
/// that is malformed or does not belong to `user_id`.
async fn apply_positions(
    conn: &mut PgConnection,
    user_id: Uuid,
    ordered_ids: &[String],
) -> Result<(), ReorderError> {
    for (position, raw_id) in (0_i32..).zip(ordered_ids) {
        let id = Uuid::parse_str(raw_id)
            .map_err(|_| ReorderError::InvalidIdentifier(raw_id.clone()))?;

        let result = sqlx::query(
            r#"
            UPDATE links
            SET position = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            "#,
        )
        .bind(position)
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ReorderError::NotFoundOrNotOwned(id));
        }
    }

    Ok(())
}

/// Appends `new_link` after the owner's last position.
///
/// Holds the owner's row lock until commit, so creates for one user are
/// serialized and never read the same maximum.
async fn insert_at_end(
    conn: &mut PgConnection,
    id: Uuid,
    new_link: &NewLink,
) -> Result<LinkRow, sqlx::Error> {
    sqlx::query("SELECT 1 FROM users WHERE id = $1 FOR NO KEY UPDATE")
        .bind(new_link.user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query_as::<_, LinkRow>(
        r#"
        INSERT INTO links (id, user_id, title, url, position, link_type, social_platform)
        SELECT $1, $2, $3, $4, COALESCE(MAX(l.position) + 1, 0), $5, $6
        FROM links l
        WHERE l.user_id = $2
        RETURNING id, user_id, title, url, position, link_type, social_platform,
                  click_count, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(new_link.user_id)
    .bind(&new_link.title)
    .bind(&new_link.url)
    .bind(new_link.link_type.as_str())
    .bind(&new_link.social_platform)
    .fetch_one(&mut *conn)
    .await
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let new_link = Arc::new(new_link);
        let id = Uuid::new_v4();

        let row = run_in_transaction(self.pool.as_ref(), &self.retry, move |conn| {
            let new_link = Arc::clone(&new_link);
            Box::pin(async move { insert_at_end(conn, id, &new_link).await })
        })
        .await?;

        Link::try_from(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, user_id, title, url, position, link_type, social_platform,
                   click_count, created_at, updated_at
            FROM links
            WHERE user_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Link::try_from).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: LinkUpdate,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET title = $3,
                url = $4,
                link_type = COALESCE($5, link_type),
                social_platform = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, url, position, link_type, social_platform,
                      click_count, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.title)
        .bind(&update.url)
        .bind(update.link_type.map(|t| t.as_str()))
        .bind(&update.social_platform)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder(&self, user_id: Uuid, ordered_ids: Vec<String>) -> Result<(), ReorderError> {
        if ordered_ids.is_empty() {
            return Ok(());
        }

        let ordered_ids = Arc::new(ordered_ids);

        run_in_transaction(self.pool.as_ref(), &self.retry, move |conn| {
            let ordered_ids = Arc::clone(&ordered_ids);
            Box::pin(async move { apply_positions(conn, user_id, &ordered_ids).await })
        })
        .await
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE links SET click_count = click_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
