//! HTTP router construction.
//!
//! Assembles routes and the request-processing middleware chain into a
//! single `Router`. Each middleware stage either short-circuits with a
//! response or passes the request through.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api;
use crate::state::AppState;

/// Log method + path for every inbound request. Observability only; never
/// alters the outcome.
async fn log_request(req: Request, next: Next) -> Response {
    info!("Request received: {} {}", req.method(), req.uri().path());
    next.run(req).await
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/add_employee", post(api::add_employee))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
