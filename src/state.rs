//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, AvatarService, LinkService, PasswordResetService, ProfileService,
};
use crate::config::Config;
use crate::infrastructure::mail::Mailer;
use crate::infrastructure::persistence::{
    PgLinkRepository, PgProfileRepository, PgUserRepository, RetryPolicy,
};
use crate::infrastructure::storage::ImageStore;
use crate::utils::jwt::JwtKeys;

pub type AppAuthService = AuthService<PgUserRepository>;
pub type AppPasswordResetService = PasswordResetService<PgUserRepository>;
pub type AppProfileService =
    ProfileService<PgProfileRepository, PgUserRepository, PgLinkRepository>;
pub type AppLinkService = LinkService<PgLinkRepository>;
pub type AppAvatarService = AvatarService<PgUserRepository>;

/// Services are immutable after startup; cloning the state only bumps
/// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub auth_service: Arc<AppAuthService>,
    pub password_reset_service: Arc<AppPasswordResetService>,
    pub profile_service: Arc<AppProfileService>,
    pub link_service: Arc<AppLinkService>,
    pub avatar_service: Arc<AppAvatarService>,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    ///
    /// Outbound integrations are passed in so callers can substitute the
    /// null implementations.
    pub fn new(
        db: Arc<PgPool>,
        config: &Config,
        mailer: Arc<dyn Mailer>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let users = Arc::new(PgUserRepository::new(db.clone()));
        let profiles = Arc::new(PgProfileRepository::new(db.clone()));
        let links = Arc::new(
            PgLinkRepository::new(db.clone())
                .with_retry_policy(RetryPolicy::with_max_retries(config.tx_max_retries)),
        );

        let keys = JwtKeys::new(
            &config.jwt_secret,
            Duration::seconds(config.jwt_ttl_seconds),
        );

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                keys,
                config.bcrypt_cost,
            )),
            password_reset_service: Arc::new(PasswordResetService::new(
                users.clone(),
                mailer,
                config.frontend_url.clone(),
                Duration::minutes(config.password_reset_ttl_minutes),
                config.bcrypt_cost,
            )),
            profile_service: Arc::new(ProfileService::new(
                profiles,
                users.clone(),
                links.clone(),
            )),
            link_service: Arc::new(LinkService::new(links)),
            avatar_service: Arc::new(AvatarService::new(users, images)),
            db,
        }
    }
}
