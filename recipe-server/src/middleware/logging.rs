//! Request logging middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;

use crate::auth::CurrentUser;
use crate::routes::REQUEST_ID_HEADER;

/// Log every request with its id, route, caller, status and latency
///
/// Handler events are recorded inside the `request` span. `user_id` is
/// filled in once authentication has run. 4xx and 5xx completions are
/// logged at `warn`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
        user_id = tracing::field::Empty,
    );

    let response = next.run(req).instrument(span.clone()).await;

    // Set by require_auth, which runs inside this layer
    if let Some(user) = response.extensions().get::<CurrentUser>() {
        span.record("user_id", user.id);
    }

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    span.in_scope(|| {
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(status = status.as_u16(), latency_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    });

    response
}
