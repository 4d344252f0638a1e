//! Book entity and the read models built around it.

use chrono::{DateTime, Utc};

use super::review::Review;

/// Maximum title length, matching the `VARCHAR(255)` column.
pub const MAX_TITLE_LENGTH: usize = 255;

/// A book that readers can review.
///
/// Books are seeded by administrators and are never mutated by the review flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Creates a new Book instance.
    pub fn new(
        id: i64,
        title: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A book together with every review it owns.
///
/// This is the input of the ranking pipeline: aggregates are computed from
/// `reviews` per query and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BookWithReviews {
    pub book: Book,
    pub reviews: Vec<Review>,
}

/// Everything shown on a single book page.
#[derive(Debug, Clone)]
pub struct BookDetails {
    pub book: Book,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub reviews_count: i64,
    /// `None` when the book has no reviews yet.
    pub avg_rating: Option<f64>,
}
