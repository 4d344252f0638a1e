//! Review entity, the rating value object and raw submission input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Errors produced when turning raw input into a [`Rating`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("The rating must be an integer.")]
    NotAnInteger,

    #[error("The rating must be between 1 and 5.")]
    OutOfRange(i64),
}

impl RatingError {
    /// Machine-readable code reported next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            RatingError::NotAnInteger => "integer",
            RatingError::OutOfRange(_) => "range",
        }
    }
}

/// A star rating between [`Rating::MIN`] and [`Rating::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    /// Builds a rating, rejecting values outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as i16))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    pub fn value(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = RatingError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// Rating exactly as the client sent it.
///
/// Form posts deliver strings while JSON clients send numbers, so every shape
/// is accepted here and checked by [`RatingInput::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RatingInput {
    /// Parses the input as an integral rating in `1..=5`.
    ///
    /// Numeric strings are accepted after trimming surrounding whitespace;
    /// decimals are rejected even when they have no fractional part.
    pub fn parse(&self) -> Result<Rating, RatingError> {
        let value = match self {
            RatingInput::Integer(value) => *value,
            RatingInput::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| RatingError::NotAnInteger)?,
            RatingInput::Decimal(_) | RatingInput::Other(_) => {
                return Err(RatingError::NotAnInteger);
            }
        };

        Rating::new(value)
    }

    /// True for strings that are empty once trimmed. Such input counts as missing.
    pub fn is_blank(&self) -> bool {
        matches!(self, RatingInput::Text(text) if text.trim().is_empty())
    }
}

impl From<i64> for RatingInput {
    fn from(value: i64) -> Self {
        RatingInput::Integer(value)
    }
}

impl From<&str> for RatingInput {
    fn from(value: &str) -> Self {
        RatingInput::Text(value.to_string())
    }
}

/// Raised when the review is sent as something other than a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The review must be a string.")]
pub struct ReviewNotText;

impl ReviewNotText {
    pub fn code(&self) -> &'static str {
        "string"
    }
}

/// Review text exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewInput {
    Text(String),
    Other(serde_json::Value),
}

impl ReviewInput {
    /// Trims the text; blank text becomes `None`.
    pub fn normalize(self) -> Result<Option<String>, ReviewNotText> {
        match self {
            ReviewInput::Text(text) => {
                let trimmed = text.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            ReviewInput::Other(_) => Err(ReviewNotText),
        }
    }
}

impl From<&str> for ReviewInput {
    fn from(value: &str) -> Self {
        ReviewInput::Text(value.to_string())
    }
}

impl From<String> for ReviewInput {
    fn from(value: String) -> Self {
        ReviewInput::Text(value)
    }
}

/// Unvalidated review submission.
///
/// Presence and length are declared with `validator`; the rating's integer
/// and range rules live in [`RatingInput::parse`]. `review` holds trimmed text.
#[derive(Debug, Clone, Default, Validate)]
pub struct ReviewDraft {
    #[validate(required(message = "The rating field is required."))]
    pub rating: Option<RatingInput>,

    #[validate(
        required(message = "The review field is required."),
        length(min = 15, message = "The review must be at least 15 characters.")
    )]
    pub review: Option<String>,
}

/// A persisted review. Reviews are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub book_id: i64,
    pub rating: Rating,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new Review instance.
    pub fn new(
        id: i64,
        book_id: i64,
        rating: Rating,
        review: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            book_id,
            rating,
            review,
            created_at,
            updated_at,
        }
    }
}

/// Input data for inserting a validated review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub book_id: i64,
    pub rating: Rating,
    pub review: String,
    pub created_at: DateTime<Utc>,
}
