//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Everything recoverable is a typed
//! variant; only store connectivity problems surface as 5xx.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Which unique column a store insert collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    /// Field name as clients know it
    pub fn field_name(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }

    pub fn taken_message(&self) -> &'static str {
        match self {
            UniqueField::Username => "Username already taken",
            UniqueField::Email => "Email already taken",
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more input fields violated validation rules.
    /// Carries every violated field, not just the first.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Wrong password or unknown identifier. Deliberately never says
    /// which, to prevent account enumeration.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Store-level uniqueness constraint violation (insert-time race)
    #[error("{} already exists", .0.field_name())]
    UniqueViolation(UniqueField),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // All-taken means the only problems are uniqueness conflicts
            AuthError::Validation(errors) if errors.all_taken() => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::UniqueViolation(_) => StatusCode::CONFLICT,
            AuthError::Database(e) if is_transient(e) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(errors) if errors.all_taken() => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::UniqueViolation(_) => ErrorKind::Conflict,
            AuthError::Database(e) if is_transient(e) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::UniqueViolation(field) => {
                tracing::warn!(field = field.field_name(), "Unique constraint hit at insert");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Store failures worth retrying later (connectivity, pool exhaustion)
fn is_transient(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Field errors get their own body shape so clients can
            // render every violated field inline
            AuthError::Validation(ref errors) => {
                let status = self.status_code();
                let body = serde_json::json!({
                    "title": "Validation Failed",
                    "status": status.as_u16(),
                    "fieldErrors": errors,
                });
                (status, Json(body)).into_response()
            }
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status_depends_on_kinds() {
        let mut structural = ValidationErrors::new();
        structural.add_invalid("username", "Too short");
        assert_eq!(
            AuthError::Validation(structural).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let mut taken = ValidationErrors::new();
        taken.add_taken("email", "Email already taken");
        assert_eq!(
            AuthError::Validation(taken).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_credentials_and_session_map_to_401() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err = AuthError::UniqueViolation(UniqueField::Email);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
