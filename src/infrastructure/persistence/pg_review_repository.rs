//! PostgreSQL implementation of review repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewReview, Rating, Review};
use crate::domain::repositories::ReviewRepository;
use crate::error::AppError;

/// Raw `reviews` row as returned by SQLx.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub book_id: i64,
    pub rating: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = AppError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(row.rating).map_err(|e| {
            AppError::internal(
                "Stored review has an invalid rating",
                json!({ "review_id": row.id, "reason": e.to_string() }),
            )
        })?;

        Ok(Review::new(
            row.id,
            row.book_id,
            rating,
            row.review,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// PostgreSQL repository for reviews.
pub struct PgReviewRepository {
    pool: Arc<PgPool>,
}

impl PgReviewRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let book_id = new_review.book_id;

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (book_id, rating, review, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, book_id, rating, review, created_at, updated_at
            "#,
        )
        .bind(new_review.book_id)
        .bind(new_review.rating.value())
        .bind(new_review.review)
        .bind(new_review.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            let missing_book = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());

            if missing_book {
                AppError::not_found("Book not found", json!({ "book_id": book_id }))
            } else {
                AppError::from(e)
            }
        })?;

        row.try_into()
    }

    async fn list_for_book(&self, book_id: i64) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, book_id, rating, review, created_at, updated_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }
}
