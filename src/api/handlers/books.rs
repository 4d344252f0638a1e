//! Handlers for book listing and detail endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::book::{BookDetailsResponse, BookListParams, BookListResponse, BookSummary};
use crate::api::dto::pagination::PaginationMeta;
use crate::application::services::BookQuery;
use crate::domain::ranking::Preset;
use crate::error::AppError;
use crate::state::AppState;

/// Lists books, optionally ranked by a preset.
///
/// # Endpoint
///
/// `GET /api/books`
///
/// # Query Parameters
///
/// - `title` (optional): Case-insensitive title fragment
/// - `filter` (optional): `popular_last_month`, `popular_last_6months`,
///   `highest_rated_last_month` or `highest_rated_last_6months`.
///   Unknown values fall back to the newest-first listing.
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn book_list_handler(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> Result<Json<BookListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let preset = params.filter.as_deref().and_then(|filter| {
        filter
            .parse::<Preset>()
            .inspect_err(|e| tracing::debug!(error = %e, "Ignoring unknown filter"))
            .ok()
    });

    let ranked = state
        .book_service
        .list_books(BookQuery {
            title: params.title,
            preset,
        })
        .await?;

    let total_items = ranked.len();
    let items = ranked
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(BookSummary::from)
        .collect();

    Ok(Json(BookListResponse {
        pagination: PaginationMeta::new(
            params.pagination.page(),
            params.pagination.page_size(),
            total_items,
        ),
        items,
    }))
}

/// Returns a book with its reviews.
///
/// # Endpoint
///
/// `GET /api/books/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the book does not exist.
pub async fn book_details_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookDetailsResponse>, AppError> {
    let details = state.book_service.get_book_details(id).await?;

    Ok(Json(details.into()))
}
