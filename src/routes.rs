//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                  - Health check (database)
//! - `GET  /api/books`               - Ranked book list
//! - `GET  /api/books/{id}`          - Book details
//! - `POST /api/books/{id}/reviews`  - Review submission (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on review submission
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The review route keys its rate limit on the peer address, so the returned
/// service must be served with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::public_routes().merge(api::routes::review_routes());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
