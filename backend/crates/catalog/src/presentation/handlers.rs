//! HTTP Handlers
//!
//! Identity comes exclusively from the [`AuthContext`] extension placed
//! by the auth middleware. A request that skipped the middleware is
//! treated as anonymous, never trusted.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::AuthContext;

use crate::application::config::CatalogConfig;
use crate::application::movies::{MovieInput, MovieService};
use crate::application::ratings::RatingService;
use crate::domain::repository::{MovieRepository, OwnerDirectory, RatingRepository};
use crate::domain::value_object::{MovieId, UserId};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    MovieDetailResponse, MovieRequest, MovieResponse, RateRequest, RatingResponse,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

// Manual impl so `R` itself does not need to be Clone
impl<R> Clone for CatalogAppState<R>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> CatalogAppState<R>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    fn movies(&self) -> MovieService<R> {
        MovieService::new(self.repo.clone(), self.config.clone())
    }

    fn ratings(&self) -> RatingService<R> {
        RatingService::new(self.repo.clone())
    }
}

fn current_user(context: Option<Extension<AuthContext>>) -> Option<UserId> {
    context.and_then(|Extension(c)| c.user_id)
}

// ============================================================================
// Movies
// ============================================================================

/// POST /api/movies
pub async fn create_movie<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
    Json(req): Json<MovieRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let movie = state
        .movies()
        .create(current_user(context), movie_input(req))
        .await?;

    Ok((StatusCode::CREATED, Json(MovieResponse::from(&movie))))
}

/// GET /api/movies
pub async fn list_movies<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
) -> CatalogResult<Json<Vec<MovieResponse>>>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let movies = state.movies().list(current_user(context)).await?;

    Ok(Json(movies.iter().map(MovieResponse::from).collect()))
}

/// GET /api/movies/{id}
pub async fn movie_detail<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<MovieDetailResponse>>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let detail = state
        .movies()
        .detail(current_user(context), &MovieId::from_uuid(id))
        .await?;

    Ok(Json(MovieDetailResponse::from(&detail)))
}

/// PUT /api/movies/{id}
pub async fn update_movie<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
    Path(id): Path<Uuid>,
    Json(req): Json<MovieRequest>,
) -> CatalogResult<Json<MovieResponse>>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let movie = state
        .movies()
        .update(current_user(context), &MovieId::from_uuid(id), movie_input(req))
        .await?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// DELETE /api/movies/{id}
pub async fn delete_movie<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    state
        .movies()
        .delete(current_user(context), &MovieId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Ratings
// ============================================================================

/// POST /api/movies/{id}/ratings
pub async fn rate_movie<R>(
    State(state): State<CatalogAppState<R>>,
    context: Option<Extension<AuthContext>>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let rating = state
        .ratings()
        .rate(current_user(context), &MovieId::from_uuid(id), req.value)
        .await?;

    Ok((StatusCode::CREATED, Json(RatingResponse::from(&rating))))
}

fn movie_input(req: MovieRequest) -> MovieInput {
    MovieInput {
        title: req.title,
        genre: req.genre,
        release_date: req.release_date,
        description: req.description,
    }
}
