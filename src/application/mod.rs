//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and the ranking pipeline.
//! They depend on repository traits only, so handlers and the admin CLI share
//! them unchanged.
//!
//! # Available Services
//!
//! - [`services::book_service::BookService`] - Catalogue listing, ranking and administration
//! - [`services::review_service::ReviewService`] - Review submission and validation

pub mod services;
