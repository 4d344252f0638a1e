mod common;

use book_reviews::AppError;
use book_reviews::domain::entities::{NewReview, Rating};
use book_reviews::domain::repositories::ReviewRepository;
use book_reviews::infrastructure::persistence::PgReviewRepository;
use common::days_ago;
use sqlx::PgPool;
use std::sync::Arc;

fn new_review(book_id: i64, rating: i16) -> NewReview {
    NewReview {
        book_id,
        rating: Rating::try_from(rating).unwrap(),
        review: "Quietly devastating and beautifully written.".to_string(),
        created_at: common::now(),
    }
}

#[sqlx::test]
async fn test_create_review(pool: PgPool) {
    let book_id = common::create_test_book(&pool, "Beloved", days_ago(5)).await;
    let repo = PgReviewRepository::new(Arc::new(pool));

    let review = repo.create(new_review(book_id, 5)).await.unwrap();

    assert!(review.id > 0);
    assert_eq!(review.book_id, book_id);
    assert_eq!(review.rating.value(), 5);
    assert_eq!(review.created_at, common::now());
    assert_eq!(review.updated_at, common::now());
}

#[sqlx::test]
async fn test_create_review_for_missing_book(pool: PgPool) {
    let repo = PgReviewRepository::new(Arc::new(pool));

    let err = repo.create(new_review(987654, 3)).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_list_for_book_newest_first(pool: PgPool) {
    let book_id = common::create_test_book(&pool, "Beloved", days_ago(30)).await;
    let other = common::create_test_book(&pool, "Jazz", days_ago(30)).await;
    let old = common::create_test_review(&pool, book_id, 3, days_ago(20)).await;
    let recent = common::create_test_review(&pool, book_id, 4, days_ago(2)).await;
    common::create_test_review(&pool, other, 1, days_ago(1)).await;

    let repo = PgReviewRepository::new(Arc::new(pool));

    let reviews = repo.list_for_book(book_id).await.unwrap();

    assert_eq!(
        reviews.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![recent, old]
    );
}
