//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{BookService, ReviewService};
use crate::domain::clock::Clock;
use crate::infrastructure::persistence::{PgBookRepository, PgReviewRepository};

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService<PgBookRepository, PgReviewRepository>>,
    pub review_service: Arc<ReviewService<PgReviewRepository, PgBookRepository>>,
}

impl AppState {
    /// Wires PostgreSQL repositories into the services.
    pub fn new(pool: Arc<PgPool>, clock: Arc<dyn Clock>) -> Self {
        let book_repository = Arc::new(PgBookRepository::new(pool.clone()));
        let review_repository = Arc::new(PgReviewRepository::new(pool));

        let book_service = Arc::new(BookService::new(
            book_repository.clone(),
            review_repository.clone(),
            clock.clone(),
        ));
        let review_service = Arc::new(ReviewService::new(
            review_repository,
            book_repository,
            clock,
        ));

        Self {
            book_service,
            review_service,
        }
    }
}
