//! PostgreSQL implementation of book repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use super::pg_review_repository::ReviewRow;
use crate::domain::entities::{Book, BookWithReviews, NewBook, Review};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(row.id, row.title, row.created_at, row.updated_at)
    }
}

/// Escapes `LIKE` wildcards so the fragment is matched literally.
fn contains_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// PostgreSQL repository for books and catalogue queries.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, created_at, updated_at)
            VALUES ($1, $2, $2)
            RETURNING id, title, created_at, updated_at
            "#,
        )
        .bind(new_book.title)
        .bind(new_book.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn list_with_reviews(
        &self,
        title: Option<String>,
    ) -> Result<Vec<BookWithReviews>, AppError> {
        let pattern = title.as_deref().map(contains_pattern);

        let books = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, created_at, updated_at
            FROM books
            WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        if books.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();

        let review_rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, book_id, rating, review, created_at, updated_at
            FROM reviews
            WHERE book_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&ids[..])
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_book: HashMap<i64, Vec<Review>> = HashMap::with_capacity(books.len());
        for row in review_rows {
            let review = Review::try_from(row)?;
            by_book.entry(review.book_id).or_default().push(review);
        }

        Ok(books
            .into_iter()
            .map(|row| BookWithReviews {
                reviews: by_book.remove(&row.id).unwrap_or_default(),
                book: row.into(),
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
