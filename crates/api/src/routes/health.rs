//! Health check endpoint.

use axum::Json;
use axum::Router;
use axum::routing::{any, get};

use super::redirect_slashes;

/// Path prefix the health-check router is mounted under.
pub const PREFIX: &str = "/healthcheck";

/// Health-check routes: `GET /healthcheck/`, plus a redirect from the
/// prefix without the trailing slash.
pub fn router() -> Router {
    Router::new()
        .route(&format!("{PREFIX}/"), get(check))
        .route(PREFIX, any(redirect_slashes))
}

/// GET /healthcheck/: liveness probe, always `true`.
pub async fn check() -> Json<bool> {
    Json(true)
}
