//! In-Memory Repository Implementations
//!
//! Backing store for tests and local development, with the same
//! duplicate-rating and cascade semantics as the database.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entity::{movie::Movie, rating::Rating};
use crate::domain::repository::{MovieRepository, OwnerDirectory, RatingRepository};
use crate::domain::value_object::{MovieId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// In-memory movie, rating, and owner-name store
#[derive(Default)]
pub struct InMemoryCatalogStore {
    movies: Mutex<HashMap<MovieId, Movie>>,
    ratings: Mutex<Vec<Rating>>,
    owners: Mutex<HashMap<UserId, String>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a username resolvable through [`OwnerDirectory`]
    pub fn register_owner(&self, user_id: UserId, username: impl Into<String>) {
        self.owners().insert(user_id, username.into());
    }

    fn movies(&self) -> std::sync::MutexGuard<'_, HashMap<MovieId, Movie>> {
        self.movies.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn ratings(&self) -> std::sync::MutexGuard<'_, Vec<Rating>> {
        self.ratings.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn owners(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, String>> {
        self.owners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MovieRepository for InMemoryCatalogStore {
    async fn insert(&self, movie: &Movie) -> CatalogResult<()> {
        self.movies().insert(movie.movie_id, movie.clone());
        Ok(())
    }

    async fn find_by_id(&self, movie_id: &MovieId) -> CatalogResult<Option<Movie>> {
        Ok(self.movies().get(movie_id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        let mut movies: Vec<Movie> = self.movies().values().cloned().collect();
        movies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(movies)
    }

    async fn update(&self, movie: &Movie) -> CatalogResult<()> {
        self.movies().insert(movie.movie_id, movie.clone());
        Ok(())
    }

    async fn delete(&self, movie_id: &MovieId) -> CatalogResult<()> {
        self.movies().remove(movie_id);
        // Same cascade the schema provides
        self.ratings().retain(|r| r.movie_id != *movie_id);
        Ok(())
    }
}

impl RatingRepository for InMemoryCatalogStore {
    async fn add(&self, rating: &Rating) -> CatalogResult<()> {
        let mut ratings = self.ratings();

        if ratings
            .iter()
            .any(|r| r.movie_id == rating.movie_id && r.user_id == rating.user_id)
        {
            return Err(CatalogError::AlreadyRated);
        }

        ratings.push(rating.clone());
        Ok(())
    }

    async fn find_by_movie(&self, movie_id: &MovieId) -> CatalogResult<Vec<Rating>> {
        Ok(self
            .ratings()
            .iter()
            .filter(|r| r.movie_id == *movie_id)
            .cloned()
            .collect())
    }

    async fn has_rated(&self, movie_id: &MovieId, user_id: &UserId) -> CatalogResult<bool> {
        Ok(self
            .ratings()
            .iter()
            .any(|r| r.movie_id == *movie_id && r.user_id == *user_id))
    }
}

impl OwnerDirectory for InMemoryCatalogStore {
    async fn username_of(&self, user_id: &UserId) -> CatalogResult<Option<String>> {
        Ok(self.owners().get(user_id).cloned())
    }
}
