//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::{Request, Uri};
use std::borrow::Cow;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

const RESET_PASSWORD_PREFIX: &str = "/api/auth/reset-password/";

type MakeSpan = fn(&Request<Body>) -> Span;

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - URI path (query string dropped, reset tokens masked)
///   - HTTP version
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=PUT path=/api/user/links/reorder version=HTTP/1.1}: finished processing request latency=9 ms status=200
/// INFO request{method=PATCH path=/api/auth/reset-password/*** version=HTTP/1.1}: finished processing request latency=61 ms status=400
/// ```
pub fn layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %loggable_path(req.uri()),
        version = ?req.version(),
    )
}

/// Raw reset tokens travel in the path and must never reach the logs.
fn loggable_path(uri: &Uri) -> Cow<'_, str> {
    let path = uri.path();
    if path.starts_with(RESET_PASSWORD_PREFIX) {
        Cow::Owned(format!("{RESET_PASSWORD_PREFIX}***"))
    } else {
        Cow::Borrowed(path)
    }
}
