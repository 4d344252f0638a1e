//! Domain layer containing business entities and logic.
//!
//! This module holds the core model of the review service independent of
//! HTTP and storage concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Books, reviews and the rating value object
//! - [`repositories`] - Data access trait definitions
//! - [`ranking`] - Review aggregation and the composable ranking pipeline
//! - [`clock`] - Injected time source
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Listing Flow
//!
//! 1. [`repositories::BookRepository`] loads books with their reviews
//! 2. A [`ranking::Preset`] (or the default "latest" order) composes stages
//! 3. [`ranking::Ranking`] annotates counts and averages per date window
//! 4. The ordered books are returned to the caller

pub mod clock;
pub mod entities;
pub mod ranking;
pub mod repositories;
