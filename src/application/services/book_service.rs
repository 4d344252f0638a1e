//! Book catalogue service: listing, ranking and administration.

use std::sync::Arc;

use serde_json::json;

use crate::domain::clock::Clock;
use crate::domain::entities::{Book, BookDetails, MAX_TITLE_LENGTH, NewBook};
use crate::domain::ranking::{DateRange, Preset, RankedBook, Ranking, average_rating};
use crate::domain::repositories::{BookRepository, ReviewRepository};
use crate::error::AppError;

/// Listing criteria accepted by [`BookService::list_books`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    /// Case-insensitive title fragment. Blank values are ignored.
    pub title: Option<String>,
    /// Ranking preset. `None` lists newest books first.
    pub preset: Option<Preset>,
}

/// Service for reading and managing books.
pub struct BookService<B: BookRepository, R: ReviewRepository> {
    book_repository: Arc<B>,
    review_repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<B: BookRepository, R: ReviewRepository> BookService<B, R> {
    /// Creates a new book service.
    pub fn new(book_repository: Arc<B>, review_repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            book_repository,
            review_repository,
            clock,
        }
    }

    /// Creates a book with a trimmed, non-empty title.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank or longer than
    /// [`MAX_TITLE_LENGTH`] characters.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_book(&self, title: &str) -> Result<Book, AppError> {
        let title = title.trim();

        if title.is_empty() {
            return Err(AppError::bad_request(
                "The given book is invalid.",
                json!({ "fields": { "title": ["The title field is required."] } }),
            ));
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::bad_request(
                "The given book is invalid.",
                json!({ "fields": { "title": [format!("The title may not be greater than {MAX_TITLE_LENGTH} characters.")] } }),
            ));
        }

        let book = self
            .book_repository
            .create(NewBook {
                title: title.to_string(),
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(book_id = book.id, title = %book.title, "Book created");

        Ok(book)
    }

    /// Retrieves a book by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn get_book(&self, id: i64) -> Result<Book, AppError> {
        self.book_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "book_id": id })))
    }

    /// Retrieves a book with its reviews (newest first) and all-time aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn get_book_details(&self, id: i64) -> Result<BookDetails, AppError> {
        let book = self.get_book(id).await?;
        let reviews = self.review_repository.list_for_book(id).await?;

        let avg_rating = average_rating(&reviews.iter().collect::<Vec<_>>());

        Ok(BookDetails {
            book,
            reviews_count: reviews.len() as i64,
            avg_rating,
            reviews,
        })
    }

    /// Lists books ranked by `query.preset`, or newest first without one.
    ///
    /// Unranked listings still carry all-time review counts and averages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_books(&self, query: BookQuery) -> Result<Vec<RankedBook>, AppError> {
        let title = query
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let books = self.book_repository.list_with_reviews(title).await?;
        let ranking = Ranking::new(books);

        let ranking = match query.preset {
            Some(preset) => {
                tracing::debug!(preset = %preset, "Applying ranking preset");
                preset.apply(ranking, self.clock.now())?
            }
            None => {
                let all_time = DateRange::unbounded();
                ranking.popular(&all_time).highest_rated(&all_time).latest()
            }
        };

        Ok(ranking.into_books())
    }

    /// Deletes a book and, through the foreign key, its reviews.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        if !self.book_repository.delete(id).await? {
            return Err(AppError::not_found("Book not found", json!({ "book_id": id })));
        }

        tracing::info!(book_id = id, "Book deleted");

        Ok(())
    }

    /// Checks database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.book_repository.ping().await
    }
}
