//! PostgreSQL Repository Implementations
//!
//! Ratings carry a unique index over (movie_id, user_id); a duplicate
//! insert is mapped to `AlreadyRated`. Movie deletion cascades to
//! ratings at the schema level, and owner deletion cascades to movies.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{movie::Movie, rating::Rating};
use crate::domain::repository::{MovieRepository, OwnerDirectory, RatingRepository};
use crate::domain::value_object::{MovieId, RatingId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// Catalog repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Movie Repository Implementation
// ============================================================================

impl MovieRepository for PgCatalogRepository {
    async fn insert(&self, movie: &Movie) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO movies (
                movie_id,
                owner_id,
                title,
                genre,
                release_date,
                description,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(movie.movie_id.as_uuid())
        .bind(movie.owner_id.as_uuid())
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.release_date)
        .bind(&movie.description)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, movie_id: &MovieId) -> CatalogResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT
                movie_id,
                owner_id,
                title,
                genre,
                release_date,
                description,
                created_at,
                updated_at
            FROM movies
            WHERE movie_id = $1
            "#,
        )
        .bind(movie_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MovieRow::into_movie))
    }

    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT
                movie_id,
                owner_id,
                title,
                genre,
                release_date,
                description,
                created_at,
                updated_at
            FROM movies
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MovieRow::into_movie).collect())
    }

    async fn update(&self, movie: &Movie) -> CatalogResult<()> {
        // owner_id is deliberately absent from the SET list
        sqlx::query(
            r#"
            UPDATE movies SET
                title = $2,
                genre = $3,
                release_date = $4,
                description = $5,
                updated_at = $6
            WHERE movie_id = $1
            "#,
        )
        .bind(movie.movie_id.as_uuid())
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.release_date)
        .bind(&movie.description)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, movie_id: &MovieId) -> CatalogResult<()> {
        // Ratings cascade via the FK
        sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(movie_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Rating Repository Implementation
// ============================================================================

impl RatingRepository for PgCatalogRepository {
    async fn add(&self, rating: &Rating) -> CatalogResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO ratings (rating_id, movie_id, user_id, value, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(rating.rating_id.as_uuid())
        .bind(rating.movie_id.as_uuid())
        .bind(rating.user_id.as_uuid())
        .bind(i16::from(rating.value))
        .bind(rating.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(CatalogError::AlreadyRated),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_movie(&self, movie_id: &MovieId) -> CatalogResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT rating_id, movie_id, user_id, value, created_at
            FROM ratings
            WHERE movie_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(movie_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RatingRow::into_rating).collect())
    }

    async fn has_rated(&self, movie_id: &MovieId, user_id: &UserId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ratings WHERE movie_id = $1 AND user_id = $2)",
        )
        .bind(movie_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Owner Directory Implementation
// ============================================================================

impl OwnerDirectory for PgCatalogRepository {
    async fn username_of(&self, user_id: &UserId) -> CatalogResult<Option<String>> {
        let username =
            sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(username)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct MovieRow {
    movie_id: Uuid,
    owner_id: Uuid,
    title: String,
    genre: String,
    release_date: NaiveDate,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MovieRow {
    fn into_movie(self) -> Movie {
        Movie {
            movie_id: MovieId::from_uuid(self.movie_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: self.title,
            genre: self.genre,
            release_date: self.release_date,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    rating_id: Uuid,
    movie_id: Uuid,
    user_id: Uuid,
    value: i16,
    created_at: DateTime<Utc>,
}

impl RatingRow {
    fn into_rating(self) -> Rating {
        Rating {
            rating_id: RatingId::from_uuid(self.rating_id),
            movie_id: MovieId::from_uuid(self.movie_id),
            user_id: UserId::from_uuid(self.user_id),
            // Stored as SMALLINT constrained 1..=5
            value: self.value.clamp(1, 5) as u8,
            created_at: self.created_at,
        }
    }
}
