//! DTOs for review submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{RatingInput, Review, ReviewInput};

pub const REVIEW_ADDED_MESSAGE: &str = "Review added successfully. Thank you!";

/// Request body for `POST /api/books/{id}/reviews`.
///
/// Both fields are optional and loosely typed at this level so that missing or
/// mistyped values are reported as field errors instead of a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub rating: Option<RatingInput>,

    #[serde(default)]
    pub review: Option<ReviewInput>,
}

#[derive(Debug, Serialize)]
pub struct CreateReviewResponse {
    pub message: String,
    pub review: ReviewInfo,
}

#[derive(Debug, Serialize)]
pub struct ReviewInfo {
    pub id: i64,
    pub book_id: i64,
    pub rating: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewInfo {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            book_id: review.book_id,
            rating: review.rating.value(),
            review: review.review,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let req: CreateReviewRequest = serde_json::from_str("{}").unwrap();
        assert!(req.rating.is_none());
        assert!(req.review.is_none());
    }

    #[test]
    fn test_string_rating_is_kept_raw() {
        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"rating": "4", "review": "Loved every page of it"}"#).unwrap();
        assert_eq!(req.rating, Some(RatingInput::Text("4".to_string())));
    }

    #[test]
    fn test_non_string_review_is_kept_raw() {
        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"rating": 5, "review": 12345}"#).unwrap();
        assert_eq!(req.review, Some(ReviewInput::Other(serde_json::json!(12345))));

        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"rating": 5, "review": null}"#).unwrap();
        assert!(req.review.is_none());
    }
}
