//! HTTP API server exposing a health check, a greeting and an item lookup.
//!
//! Handlers are stateless; the only shared objects are the route table
//! built by [`create_app`] and the Prometheus recorder handle.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::routing::{any, get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use middleware::MakeRequestUuid;

/// Creates the Axum application router with all routes mounted.
pub fn create_app(metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/", get(routes::root::read_root))
        .route("/items/{item_id}", get(routes::items::read_item))
        .route("/items/{item_id}/", any(routes::redirect_slashes))
        .merge(routes::health::router())
        .merge(routes::metrics::router(metrics_handle))
        .route("/metrics/", any(routes::redirect_slashes))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(axum::middleware::from_fn(middleware::track_metrics))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
