//! Cross-origin policy for the browser frontend.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allows the configured frontend origin to call the API with a bearer token.
///
/// An origin that is not a valid header value disables cross-origin access
/// instead of failing startup.
pub fn layer(frontend_url: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(frontend_url) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "Invalid CORS origin, cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
