#![allow(dead_code)]

use book_reviews::domain::clock::FixedClock;
use book_reviews::state::AppState;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;

/// The instant every test treats as "now".
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - chrono::Duration::days(days)
}

pub async fn create_test_book(pool: &PgPool, title: &str, created_at: DateTime<Utc>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO books (title, created_at, updated_at) VALUES ($1, $2, $2) RETURNING id",
    )
    .bind(title)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_review(
    pool: &PgPool,
    book_id: i64,
    rating: i16,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO reviews (book_id, rating, review, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $4) RETURNING id",
    )
    .bind(book_id)
    .bind(rating)
    .bind("A review long enough to pass validation")
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_reviews(pool: &PgPool, book_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE book_id = $1")
        .bind(book_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), Arc::new(FixedClock(now())))
}
