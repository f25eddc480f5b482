//! API DTOs (Data Transfer Objects)
//!
//! Owner identity never appears in request bodies; it is always taken
//! from the resolved session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::movies::MovieDetail;
use crate::domain::entity::{movie::Movie, rating::Rating};

// ============================================================================
// Movies
// ============================================================================

/// Create/update movie request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub description: String,
}

/// Movie response (list and mutation results)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub movie_id: String,
    pub owner_id: String,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.movie_id.to_string(),
            owner_id: movie.owner_id.to_string(),
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            release_date: movie.release_date,
            description: movie.description.clone(),
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

/// Movie detail response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub owner_username: Option<String>,
    pub ratings: Vec<RatingResponse>,
    pub average_rating: Option<f64>,
    pub user_has_rated: bool,
}

impl From<&MovieDetail> for MovieDetailResponse {
    fn from(detail: &MovieDetail) -> Self {
        Self {
            movie: MovieResponse::from(&detail.movie),
            owner_username: detail.owner_username.clone(),
            ratings: detail.ratings.iter().map(RatingResponse::from).collect(),
            average_rating: detail.average_rating,
            user_has_rated: detail.user_has_rated,
        }
    }
}

// ============================================================================
// Ratings
// ============================================================================

/// Rate request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub value: u8,
}

/// Rating response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub user_id: String,
    pub value: u8,
    pub created_at: DateTime<Utc>,
}

impl From<&Rating> for RatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            user_id: rating.user_id.to_string(),
            value: rating.value,
            created_at: rating.created_at,
        }
    }
}
