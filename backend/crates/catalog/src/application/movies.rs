//! Movie Service
//!
//! CRUD over owned movies. Identity always arrives here as the
//! server-resolved session user, never as client input; the ownership
//! guard decides from there.

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::validation::ValidationErrors;

use crate::application::config::CatalogConfig;
use crate::domain::entity::movie::{Movie, MovieContent};
use crate::domain::entity::rating::{self, Rating};
use crate::domain::guard::{Action, Decision, ReadPolicy, authorize};
use crate::domain::repository::{MovieRepository, OwnerDirectory, RatingRepository};
use crate::domain::value_object::{MovieId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// Raw movie fields from the client
pub struct MovieInput {
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub description: String,
}

/// Everything the detail view shows for one movie
pub struct MovieDetail {
    pub movie: Movie,
    /// Display name of the owner, `None` if the account is gone
    pub owner_username: Option<String>,
    pub ratings: Vec<Rating>,
    pub average_rating: Option<f64>,
    /// Whether the current caller has already rated this movie
    pub user_has_rated: bool,
}

/// Movie service
pub struct MovieService<R>
where
    R: MovieRepository + RatingRepository + OwnerDirectory,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> MovieService<R>
where
    R: MovieRepository + RatingRepository + OwnerDirectory,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    /// Create a movie owned by the current user
    pub async fn create(&self, current: Option<UserId>, input: MovieInput) -> CatalogResult<Movie> {
        let owner_id = current.ok_or(CatalogError::Unauthenticated)?;
        let content = validate_content(input)?;

        let movie = Movie::new(owner_id, content);
        self.repo.insert(&movie).await?;

        tracing::info!(movie_id = %movie.movie_id, owner_id = %owner_id, "Movie created");
        Ok(movie)
    }

    /// List all movies
    pub async fn list(&self, current: Option<UserId>) -> CatalogResult<Vec<Movie>> {
        self.check_read_policy(current)?;
        self.repo.list().await
    }

    /// Detail view for one movie
    pub async fn detail(
        &self,
        current: Option<UserId>,
        movie_id: &MovieId,
    ) -> CatalogResult<MovieDetail> {
        let movie = self.load(movie_id).await?;

        self.guard(current, &movie, Action::Read)?;

        let owner_username = self.repo.username_of(&movie.owner_id).await?;
        let ratings = self.repo.find_by_movie(movie_id).await?;
        let average_rating = rating::average(&ratings);
        let user_has_rated = match current {
            Some(user_id) => ratings.iter().any(|r| r.user_id == user_id),
            None => false,
        };

        Ok(MovieDetail {
            movie,
            owner_username,
            ratings,
            average_rating,
            user_has_rated,
        })
    }

    /// Update content fields; ownership and id never change
    pub async fn update(
        &self,
        current: Option<UserId>,
        movie_id: &MovieId,
        input: MovieInput,
    ) -> CatalogResult<Movie> {
        let mut movie = self.load(movie_id).await?;

        self.guard(current, &movie, Action::Write)?;

        let content = validate_content(input)?;
        movie.apply(content);
        self.repo.update(&movie).await?;

        tracing::info!(movie_id = %movie.movie_id, "Movie updated");
        Ok(movie)
    }

    /// Delete a movie (ratings go with it)
    pub async fn delete(&self, current: Option<UserId>, movie_id: &MovieId) -> CatalogResult<()> {
        let movie = self.load(movie_id).await?;

        self.guard(current, &movie, Action::Delete)?;

        self.repo.delete(movie_id).await?;

        tracing::info!(movie_id = %movie_id, "Movie deleted");
        Ok(())
    }

    async fn load(&self, movie_id: &MovieId) -> CatalogResult<Movie> {
        self.repo
            .find_by_id(movie_id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    fn guard(&self, current: Option<UserId>, movie: &Movie, action: Action) -> CatalogResult<()> {
        match authorize(current, movie.owner_id, action, self.config.read_policy) {
            Decision::Allow => Ok(()),
            Decision::DenyUnauthenticated => Err(CatalogError::Unauthenticated),
            Decision::DenyForbidden => Err(CatalogError::Forbidden),
        }
    }

    /// Read check for list, which has no single owner to guard against
    fn check_read_policy(&self, current: Option<UserId>) -> CatalogResult<()> {
        match self.config.read_policy {
            ReadPolicy::Public => Ok(()),
            ReadPolicy::AuthenticatedOnly if current.is_some() => Ok(()),
            ReadPolicy::AuthenticatedOnly => Err(CatalogError::Unauthenticated),
        }
    }
}

/// Validate raw fields, reporting every violation at once
fn validate_content(input: MovieInput) -> Result<MovieContent, CatalogError> {
    let mut errors = ValidationErrors::new();

    let title = input.title.trim().to_string();
    if title.chars().count() < 2 {
        errors.add_invalid("title", "Title must be at least 2 characters");
    }

    let genre = input.genre.trim().to_string();
    if genre.chars().count() < 2 {
        errors.add_invalid("genre", "Genre must be at least 2 characters");
    }

    let description = input.description.trim().to_string();
    if description.chars().count() < 10 {
        errors.add_invalid("description", "Description must be at least 10 characters");
    }

    errors
        .into_result(MovieContent {
            title,
            genre,
            release_date: input.release_date,
            description,
        })
        .map_err(CatalogError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_collects_all_fields() {
        let input = MovieInput {
            title: "x".to_string(),
            genre: " ".to_string(),
            release_date: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            description: "too short".to_string(),
        };

        let Err(CatalogError::Validation(errors)) = validate_content(input) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_trims_fields() {
        let input = MovieInput {
            title: "  The Matrix  ".to_string(),
            genre: "Sci-Fi".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            description: "A hacker learns the truth about his reality.".to_string(),
        };

        let content = validate_content(input).unwrap();
        assert_eq!(content.title, "The Matrix");
    }
}
