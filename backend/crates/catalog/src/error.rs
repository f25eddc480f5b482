//! Catalog Error Types
//!
//! The two authorization denials stay distinct all the way to HTTP:
//! `Unauthenticated` is 401 with the auth-required marker header,
//! `Forbidden` is 403. Collapsing them would leave clients unable to
//! tell "log in first" from "not yours".

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use thiserror::Error;

use auth::presentation::middleware::AUTH_REQUIRED_HEADER;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more input fields violated validation rules
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Resource does not exist
    #[error("Resource not found")]
    NotFound,

    /// No session identity; the caller must log in
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller is authenticated but not the owner
    #[error("Access denied")]
    Forbidden,

    /// The user already rated this movie
    #[error("Already rated")]
    AlreadyRated,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CatalogError::Forbidden => StatusCode::FORBIDDEN,
            CatalogError::AlreadyRated => StatusCode::CONFLICT,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::Unauthenticated => ErrorKind::Unauthorized,
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::AlreadyRated => ErrorKind::Conflict,
            CatalogError::Database(_) | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::Forbidden => {
                tracing::warn!("Forbidden catalog access attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            CatalogError::Validation(ref errors) => {
                let status = self.status_code();
                let body = serde_json::json!({
                    "title": "Validation Failed",
                    "status": status.as_u16(),
                    "fieldErrors": errors,
                });
                (status, Json(body)).into_response()
            }
            CatalogError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, [(AUTH_REQUIRED_HEADER, "true")]).into_response()
            }
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denials_map_to_distinct_statuses() {
        assert_eq!(
            CatalogError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(CatalogError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_already_rated_is_conflict() {
        assert_eq!(CatalogError::AlreadyRated.status_code(), StatusCode::CONFLICT);
        assert_eq!(CatalogError::AlreadyRated.kind(), ErrorKind::Conflict);
    }
}
