//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use axum::body::Body;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters for one group of routes.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Seconds needed to replenish one request.
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public endpoints: profile pages, click counting, liveness.
///
/// One request replenished per second, bursts of up to 100.
pub const PUBLIC: Limits = Limits {
    per_second: 1,
    burst_size: 100,
};

/// Authentication endpoints, where every request costs a bcrypt round or
/// may send an email.
///
/// One request replenished every 2 seconds, bursts of up to 10.
pub const AUTH: Limits = Limits {
    per_second: 2,
    burst_size: 10,
};

/// Wraps `router` in a per-client-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// When `behind_proxy` is `false` the key is the socket peer address, which
/// requires serving with `into_make_service_with_connect_info`. When it is
/// `true` the client IP is read from `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded` first; enable only behind a trusted reverse proxy.
///
/// # Example
///
/// ```rust,ignore
/// let auth = rate_limit::apply(api::routes::auth_routes(), rate_limit::AUTH, false);
/// ```
pub fn apply(router: Router<AppState>, limits: Limits, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        let config = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish();

        match config {
            Some(config) => {
                let layer: GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> =
                    GovernorLayer::new(Arc::new(config));
                router.layer(layer)
            }
            None => unlimited(router, limits),
        }
    } else {
        let config = GovernorConfigBuilder::default()
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish();

        match config {
            Some(config) => {
                let layer: GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> =
                    GovernorLayer::new(Arc::new(config));
                router.layer(layer)
            }
            None => unlimited(router, limits),
        }
    }
}

/// `finish()` only refuses zero rates or bursts.
fn unlimited(router: Router<AppState>, limits: Limits) -> Router<AppState> {
    tracing::warn!(?limits, "Invalid rate limit, serving routes without one");
    router
}
