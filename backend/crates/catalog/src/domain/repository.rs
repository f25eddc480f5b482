//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{movie::Movie, rating::Rating};
use crate::domain::value_object::{MovieId, UserId};
use crate::error::CatalogResult;

/// Movie repository trait
#[trait_variant::make(MovieRepository: Send)]
pub trait LocalMovieRepository {
    /// Insert a new movie
    async fn insert(&self, movie: &Movie) -> CatalogResult<()>;

    /// Find movie by ID
    async fn find_by_id(&self, movie_id: &MovieId) -> CatalogResult<Option<Movie>>;

    /// List all movies, newest first
    async fn list(&self) -> CatalogResult<Vec<Movie>>;

    /// Update content fields of an existing movie
    async fn update(&self, movie: &Movie) -> CatalogResult<()>;

    /// Delete a movie and its ratings
    async fn delete(&self, movie_id: &MovieId) -> CatalogResult<()>;
}

/// Rating repository trait
#[trait_variant::make(RatingRepository: Send)]
pub trait LocalRatingRepository {
    /// Record a rating
    ///
    /// One per (movie, user); a duplicate surfaces as
    /// [`crate::error::CatalogError::AlreadyRated`].
    async fn add(&self, rating: &Rating) -> CatalogResult<()>;

    /// All ratings for a movie
    async fn find_by_movie(&self, movie_id: &MovieId) -> CatalogResult<Vec<Rating>>;

    /// Whether the user already rated the movie
    async fn has_rated(&self, movie_id: &MovieId, user_id: &UserId) -> CatalogResult<bool>;
}

/// Lookup of account display data owned by the auth side
///
/// The catalog never touches credentials; it only needs a username to
/// show next to an owned resource.
#[trait_variant::make(OwnerDirectory: Send)]
pub trait LocalOwnerDirectory {
    /// Display username for a user id, `None` if the account is gone
    async fn username_of(&self, user_id: &UserId) -> CatalogResult<Option<String>>;
}
