//! PostgreSQL implementation of profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{ButtonStyle, Profile, ProfilePatch};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    bio: Option<String>,
    theme_color: String,
    button_style: String,
    selected_theme_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        let button_style = r.button_style.parse::<ButtonStyle>().map_err(|e| {
            AppError::internal(
                "Corrupt profile row",
                json!({ "profile_id": r.id, "reason": e }),
            )
        })?;

        Ok(Profile {
            id: r.id,
            user_id: r.user_id,
            bio: r.bio,
            theme_color: r.theme_color,
            button_style,
            selected_theme_id: r.selected_theme_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// PostgreSQL repository for profiles.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, user_id, bio, theme_color, button_style, selected_theme_id,
                   created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn upsert(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError> {
        let (set_theme, theme_id) = match patch.selected_theme_id {
            Some(value) => (true, value),
            None => (false, None),
        };

        // On insert, absent fields fall back to the column defaults.
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, user_id, bio, theme_color, button_style, selected_theme_id)
            VALUES (
                $1, $2, $3,
                COALESCE($4, '#ffffff'),
                COALESCE($5, 'rounded-lg'),
                CASE WHEN $6 THEN $7 ELSE NULL END
            )
            ON CONFLICT (user_id) DO UPDATE SET
                bio = COALESCE($3, profiles.bio),
                theme_color = COALESCE($4, profiles.theme_color),
                button_style = COALESCE($5, profiles.button_style),
                selected_theme_id = CASE WHEN $6 THEN $7 ELSE profiles.selected_theme_id END,
                updated_at = NOW()
            RETURNING id, user_id, bio, theme_color, button_style, selected_theme_id,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(patch.bio)
        .bind(patch.theme_color)
        .bind(patch.button_style.map(|s| s.as_str()))
        .bind(set_theme)
        .bind(theme_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error()
                && db.is_check_violation()
            {
                return AppError::bad_request(
                    "Invalid profile data",
                    json!({ "constraint": db.constraint() }),
                );
            }
            AppError::from(e)
        })?;

        Profile::try_from(row)
    }
}
