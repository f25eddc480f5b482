//! Catalog Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::repository::{MovieRepository, OwnerDirectory, RatingRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    catalog_router_generic(repo, config)
}

/// Create a Catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: MovieRepository + RatingRepository + OwnerDirectory + Send + Sync + 'static,
{
    let state = CatalogAppState::new(Arc::new(repo), Arc::new(config));

    Router::new()
        .route(
            "/",
            get(handlers::list_movies::<R>).post(handlers::create_movie::<R>),
        )
        .route(
            "/{id}",
            get(handlers::movie_detail::<R>)
                .put(handlers::update_movie::<R>)
                .delete(handlers::delete_movie::<R>),
        )
        .route("/{id}/ratings", post(handlers::rate_movie::<R>))
        .with_state(state)
}
