//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod books;
pub mod health;
pub mod reviews;

pub use books::{book_details_handler, book_list_handler};
pub use health::health_handler;
pub use reviews::create_review_handler;
