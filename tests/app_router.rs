mod common;

use std::net::SocketAddr;

use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use book_reviews::routes::app_router;
use serde_json::json;
use sqlx::PgPool;

/// Serves the full router over HTTP with peer addresses, as the binary does.
fn make_server(pool: PgPool) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(
        app_router(common::create_test_state(pool)),
    );

    TestServer::builder().http_transport().build(app).unwrap()
}

#[sqlx::test]
async fn test_trailing_slash_is_trimmed(pool: PgPool) {
    common::create_test_book(&pool, "Kindred", common::days_ago(30)).await;
    let server = make_server(pool);

    let response = server.get("/api/books/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["pagination"]["total_items"], 1);

    server.get("/health/").await.assert_status_ok();
}

#[sqlx::test]
async fn test_review_route_through_full_stack(pool: PgPool) {
    let book_id = common::create_test_book(&pool, "Kindred", common::days_ago(30)).await;
    let server = make_server(pool.clone());

    let response = server
        .post(&format!("/api/books/{book_id}/reviews/"))
        .json(&json!({ "rating": 4, "review": "Slow start, brilliant ending." }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(common::count_reviews(&pool, book_id).await, 1);
}

#[sqlx::test]
async fn test_review_route_is_rate_limited_per_peer(pool: PgPool) {
    let server = make_server(pool);

    let mut statuses = Vec::new();
    for _ in 0..12 {
        let response = server
            .post("/api/books/999999/reviews")
            .json(&json!({ "rating": 5 }))
            .expect_failure()
            .await;
        statuses.push(response.status_code());
    }

    assert!(statuses[..10].iter().all(|s| *s == StatusCode::NOT_FOUND));
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));

    // Reads are not limited.
    server.get("/api/books").await.assert_status_ok();
}
