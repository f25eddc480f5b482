//! Rating Service
//!
//! Rating requires a session identity and happens at most once per
//! (movie, user). The pre-check gives the friendly error; the store's
//! unique index settles races.

use std::sync::Arc;

use kernel::validation::ValidationErrors;

use crate::domain::entity::rating::{RATING_MAX, RATING_MIN, Rating};
use crate::domain::repository::{MovieRepository, RatingRepository};
use crate::domain::value_object::{MovieId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// Rating service
pub struct RatingService<R>
where
    R: MovieRepository + RatingRepository,
{
    repo: Arc<R>,
}

impl<R> RatingService<R>
where
    R: MovieRepository + RatingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Rate a movie as the current user
    pub async fn rate(
        &self,
        current: Option<UserId>,
        movie_id: &MovieId,
        value: u8,
    ) -> CatalogResult<Rating> {
        let user_id = current.ok_or(CatalogError::Unauthenticated)?;

        if self.repo.find_by_id(movie_id).await?.is_none() {
            return Err(CatalogError::NotFound);
        }

        let Some(rating) = Rating::new(*movie_id, user_id, value) else {
            let mut errors = ValidationErrors::new();
            errors.add_invalid(
                "value",
                format!("Rating must be between {RATING_MIN} and {RATING_MAX}"),
            );
            return Err(CatalogError::Validation(errors));
        };

        if self.repo.has_rated(movie_id, &user_id).await? {
            return Err(CatalogError::AlreadyRated);
        }

        // A concurrent duplicate still collides on the store's unique
        // index and comes back as AlreadyRated
        self.repo.add(&rating).await?;

        tracing::info!(movie_id = %movie_id, user_id = %user_id, value, "Movie rated");
        Ok(rating)
    }
}
