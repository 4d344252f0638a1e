//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; aggregation and ordering live in
//! [`crate::domain::ranking`].
//!
//! # Entity Types
//!
//! - [`Book`] - A reviewable book
//! - [`Review`] - A rating plus text written about a book
//! - [`Rating`] - Star rating value object, always within `1..=5`
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewBook`, `NewReview` - For creating new records
//! - `ReviewDraft` - Raw, unvalidated submission input

pub mod book;
pub mod review;

pub use book::{Book, BookDetails, BookWithReviews, MAX_TITLE_LENGTH, NewBook};
pub use review::{
    NewReview, Rating, RatingError, RatingInput, Review, ReviewDraft, ReviewInput, ReviewNotText,
};
