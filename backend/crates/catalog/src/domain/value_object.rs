//! Catalog ID Types

use kernel::id::Id;

pub struct MovieMarker;
pub type MovieId = Id<MovieMarker>;

pub struct RatingMarker;
pub type RatingId = Id<RatingMarker>;

/// Owner identity reuses the auth crate's user id type, so an id from a
/// resolved session can flow into the guard without conversion.
pub use auth::domain::value_object::user_id::UserId;
