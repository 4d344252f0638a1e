//! Handler for review submission.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::review::{CreateReviewRequest, CreateReviewResponse, REVIEW_ADDED_MESSAGE};
use crate::application::services::INVALID_REVIEW_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;

/// Adds a review to a book.
///
/// # Endpoint
///
/// `POST /api/books/{id}/reviews`
///
/// # Request Body
///
/// ```json
/// {
///   "rating": 4,
///   "review": "Slow start, brilliant ending."
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Review added successfully. Thank you!",
///   "review": {
///     "id": 12,
///     "book_id": 3,
///     "rating": 4,
///     "review": "Slow start, brilliant ending.",
///     "created_at": "2024-06-15T12:00:00Z",
///     "updated_at": "2024-06-15T12:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the book does not exist.
/// Returns 400 Bad Request listing every invalid field, or when the body is
/// not a JSON object.
pub async fn create_review_handler(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(book_id, error = %rejection, "Unreadable review body");
        AppError::bad_request(
            INVALID_REVIEW_MESSAGE,
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let review = state
        .review_service
        .submit(book_id, payload.rating, payload.review)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            message: REVIEW_ADDED_MESSAGE.to_string(),
            review: review.into(),
        }),
    ))
}
