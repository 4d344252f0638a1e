//! Review submission service.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::json;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::clock::Clock;
use crate::domain::entities::{NewReview, Rating, RatingInput, Review, ReviewDraft, ReviewInput};
use crate::domain::repositories::{BookRepository, ReviewRepository};
use crate::error::{AppError, validation_details};

pub const INVALID_REVIEW_MESSAGE: &str = "The given review is invalid.";

/// Service accepting new reviews for existing books.
///
/// The book must exist before content is validated; nothing is written unless
/// every field passes.
pub struct ReviewService<R: ReviewRepository, B: BookRepository> {
    review_repository: Arc<R>,
    book_repository: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<R: ReviewRepository, B: BookRepository> ReviewService<R, B> {
    /// Creates a new review service.
    pub fn new(review_repository: Arc<R>, book_repository: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            review_repository,
            book_repository,
            clock,
        }
    }

    /// Validates and stores a review for `book_id`.
    ///
    /// # Validation
    ///
    /// - `rating`: required, an integer between 1 and 5 (numeric strings allowed)
    /// - `review`: required string, at least 15 characters once trimmed
    ///
    /// Blank strings count as missing. The trimmed text is what gets stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist (checked first).
    /// Returns [`AppError::Validation`] listing every failing field.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn submit(
        &self,
        book_id: i64,
        rating: Option<RatingInput>,
        review: Option<ReviewInput>,
    ) -> Result<Review, AppError> {
        let book = self
            .book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "book_id": book_id })))?;

        let (rating, review) = validate_draft(rating, review).inspect_err(|_| {
            tracing::debug!(book_id, "Review rejected by validation");
        })?;

        let new_review = NewReview {
            book_id: book.id,
            rating,
            review,
            created_at: self.clock.now(),
        };

        let created = self.review_repository.create(new_review).await?;

        tracing::info!(
            book_id = created.book_id,
            review_id = created.id,
            rating = created.rating.value(),
            "Review added"
        );

        Ok(created)
    }
}

/// Runs the declarative checks and the rating parse, merging their errors.
fn validate_draft(
    rating: Option<RatingInput>,
    review: Option<ReviewInput>,
) -> Result<(Rating, String), AppError> {
    let (review, type_error) = match review.map(ReviewInput::normalize) {
        Some(Ok(text)) => (text, None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let draft = ReviewDraft {
        rating: rating.filter(|input| !input.is_blank()),
        review,
    };

    let mut errors = match draft.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    // A non-string review is reported as such, not as missing.
    if let Some(e) = type_error {
        errors.errors_mut().remove("review");
        errors.add("review", field_error(e.code(), e.to_string()));
    }

    let rating = match draft.rating.as_ref().map(RatingInput::parse) {
        Some(Ok(rating)) => Some(rating),
        Some(Err(e)) => {
            errors.add("rating", field_error(e.code(), e.to_string()));
            None
        }
        None => None,
    };

    match (rating, draft.review) {
        (Some(rating), Some(review)) if errors.field_errors().is_empty() => Ok((rating, review)),
        _ => Err(AppError::bad_request(
            INVALID_REVIEW_MESSAGE,
            validation_details(&errors),
        )),
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}
