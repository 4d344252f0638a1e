//! Business logic services for the application layer.

pub mod book_service;
pub mod review_service;

pub use book_service::{BookQuery, BookService};
pub use review_service::{INVALID_REVIEW_MESSAGE, ReviewService};
