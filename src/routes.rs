//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: database (public)
//! - `/api/auth/*`           - Registration, login, password reset (public, strict rate limit)
//! - `/api/auth/me`, `/api/user/*` - Own account, profile, links, avatar (Bearer token required)
//! - `/api/ping`, `/api/profiles/*`, `/api/links/*/click` - Public pages and click counting
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Only the configured frontend origin
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer JWT on account routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `frontend_url` - the single origin allowed to make cross-origin requests
pub fn app_router(state: AppState, behind_proxy: bool, frontend_url: &str) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let protected = rate_limit::apply(protected, rate_limit::PUBLIC, behind_proxy);

    let auth = rate_limit::apply(api::routes::auth_routes(), rate_limit::AUTH, behind_proxy);

    let public = rate_limit::apply(api::routes::public_routes(), rate_limit::PUBLIC, behind_proxy);

    let api_router = Router::new().merge(protected).merge(auth).merge(public);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors::layer(frontend_url))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
