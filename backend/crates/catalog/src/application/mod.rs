//! Application Layer
//!
//! Services orchestrating domain logic and repositories.

pub mod config;
pub mod movies;
pub mod ratings;

// Re-exports
pub use config::CatalogConfig;
pub use movies::{MovieDetail, MovieInput, MovieService};
pub use ratings::RatingService;
