//! API route configuration.

use crate::api::handlers::{book_details_handler, book_list_handler, create_review_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only catalogue routes.
///
/// # Endpoints
///
/// - `GET /books`       - Ranked, paginated book list
/// - `GET /books/{id}`  - Book details with reviews
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(book_list_handler))
        .route("/books/{id}", get(book_details_handler))
}

/// Review submission, rate limited per client IP.
///
/// # Endpoints
///
/// - `POST /books/{id}/reviews` - Add a review to a book
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/books/{id}/reviews", post(create_review_handler))
        .layer(rate_limit::layer())
}
