//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Review content is
//! validated by the service layer, not here.

pub mod book;
pub mod health;
pub mod pagination;
pub mod review;
