//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! prepared statements and `FromRow` mappings.
//!
//! # Repositories
//!
//! - [`PgBookRepository`] - Book storage and catalogue queries
//! - [`PgReviewRepository`] - Review insertion and lookups

pub mod pg_book_repository;
pub mod pg_review_repository;

pub use pg_book_repository::PgBookRepository;
pub use pg_review_repository::PgReviewRepository;
