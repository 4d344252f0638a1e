//! Repository trait for review data access.

use crate::domain::entities::{NewReview, Review};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reviews.
///
/// Reviews are write-once: there is no update or delete path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReviewRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a single review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced book no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError>;

    /// Lists the reviews of one book, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_book(&self, book_id: i64) -> Result<Vec<Review>, AppError>;
}
