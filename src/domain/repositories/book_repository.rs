//! Repository trait for book data access.

use crate::domain::entities::{Book, BookWithReviews, NewBook};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing books.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_book.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Creates a new book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a book by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Book))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Loads books together with all of their reviews.
    ///
    /// When `title` is given only books whose title contains it
    /// (case-insensitive) are returned. Books are ordered newest first and
    /// reviews oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_reviews(&self, title: Option<String>)
    -> Result<Vec<BookWithReviews>, AppError>;

    /// Deletes a book. Its reviews are removed by the cascading foreign key.
    ///
    /// Returns `Ok(true)` if a book was deleted, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
