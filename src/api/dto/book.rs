//! DTOs for book listing and detail endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{PaginationMeta, PaginationParams};
use super::review::ReviewInfo;
use crate::domain::entities::BookDetails;
use crate::domain::ranking::RankedBook;

/// Query parameters for `GET /api/books`.
#[derive(Debug, Default, Deserialize)]
pub struct BookListParams {
    pub title: Option<String>,

    /// Ranking preset name, e.g. `popular_last_month`.
    pub filter: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated, ranked list of books.
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub reviews_count: i64,
    pub avg_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<RankedBook> for BookSummary {
    fn from(ranked: RankedBook) -> Self {
        Self {
            id: ranked.book.id,
            title: ranked.book.title,
            reviews_count: ranked.reviews_count.unwrap_or_default(),
            avg_rating: ranked.avg_rating,
            created_at: ranked.book.created_at,
        }
    }
}

/// A single book with its reviews, newest first.
#[derive(Debug, Serialize)]
pub struct BookDetailsResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub reviews_count: i64,
    pub avg_rating: Option<f64>,
    pub reviews: Vec<ReviewInfo>,
}

impl From<BookDetails> for BookDetailsResponse {
    fn from(details: BookDetails) -> Self {
        Self {
            id: details.book.id,
            title: details.book.title,
            created_at: details.book.created_at,
            reviews_count: details.reviews_count,
            avg_rating: details.avg_rating,
            reviews: details.reviews.into_iter().map(ReviewInfo::from).collect(),
        }
    }
}
