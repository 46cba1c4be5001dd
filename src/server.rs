//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, outbound integrations and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::infrastructure::mail::{Mailer, NullMailer, SmtpMailer};
use crate::infrastructure::storage::{CloudinaryStore, ImageStore, NullImageStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - SMTP mailer (or NullMailer fallback)
/// - Cloudinary image store (or NullImageStore fallback)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let mailer = build_mailer(&config);
    let images = build_image_store(&config);

    let state = AppState::new(Arc::new(pool), &config, mailer, images);

    let app = app_router(state, config.behind_proxy, &config.frontend_url);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

fn build_mailer(config: &Config) -> Arc<dyn Mailer> {
    let Some(smtp) = &config.smtp else {
        tracing::info!("Email disabled (NullMailer)");
        return Arc::new(NullMailer::new());
    };

    match SmtpMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "Email enabled (SMTP)");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::warn!("Failed to set up SMTP: {}. Using NullMailer.", e);
            Arc::new(NullMailer::new())
        }
    }
}

fn build_image_store(config: &Config) -> Arc<dyn ImageStore> {
    let Some(cloudinary) = &config.cloudinary else {
        tracing::info!("Avatar storage disabled (NullImageStore)");
        return Arc::new(NullImageStore::new());
    };

    match CloudinaryStore::new(cloudinary) {
        Ok(store) => {
            tracing::info!(cloud = %cloudinary.cloud_name, "Avatar storage enabled (Cloudinary)");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Failed to set up Cloudinary: {}. Using NullImageStore.", e);
            Arc::new(NullImageStore::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
