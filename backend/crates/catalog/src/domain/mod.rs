//! Domain Layer
//!
//! Contains entities, the ownership guard, and repository traits.

pub mod entity;
pub mod guard;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{movie::Movie, rating::Rating};
pub use guard::{Action, Decision, ReadPolicy, authorize};
pub use repository::{MovieRepository, OwnerDirectory, RatingRepository};
