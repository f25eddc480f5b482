//! Registration Use Case
//!
//! Validates every field, hashes the password, inserts the account, and
//! signs the new user in.
//!
//! Validation reports all violated fields at once. Uniqueness is
//! pre-checked for friendly errors but the store is the authority: a
//! concurrent duplicate surfaces as a unique violation on insert and is
//! mapped back to the same "taken" field error.

use std::sync::Arc;

use kernel::validation::ValidationErrors;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    email::Email,
    session_id::SessionId,
    user_password::{RawPassword, UserPassword},
    username::Username,
};
use crate::error::{AuthError, AuthResult, UniqueField};

/// Registration input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// The caller's current session id, if any (rotated on success)
    pub current_session: Option<SessionId>,
}

/// Registration output
#[derive(Debug)]
pub struct RegisterOutput {
    /// Session established for the new account
    pub session: Session,
    /// The created user
    pub user: User,
}

/// Registration use case
pub struct RegisterUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> RegisterUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(user_repo: Arc<U>, sessions: SessionManager<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let mut errors = ValidationErrors::new();

        let username = match Username::new(&input.username) {
            Ok(username) => Some(username),
            Err(e) => {
                errors.add_invalid("username", e.to_string());
                None
            }
        };

        let email = match Email::new(input.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.add_invalid("email", e.to_string());
                None
            }
        };

        if input.password != input.confirm_password {
            errors.add_invalid("confirmPassword", "Passwords do not match");
        }

        let min_length = self.config.password_min_length;
        let password = if input.password.chars().count() < min_length {
            errors.add_invalid(
                "password",
                format!("Password must be at least {min_length} characters"),
            );
            None
        } else {
            match RawPassword::new(input.password) {
                Ok(password) => Some(password),
                Err(e) => {
                    errors.add_invalid("password", e.to_string());
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        // All three validated above
        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(AuthError::Internal("Validation state lost".to_string()));
        };

        // Friendly pre-check; the insert below remains the authority
        if self.user_repo.exists_by_username(username.canonical()).await? {
            errors.add_taken("username", UniqueField::Username.taken_message());
        }
        if self.user_repo.exists_by_email(email.as_str()).await? {
            errors.add_taken("email", UniqueField::Email.taken_message());
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let hashed = self.hash_password(password).await?;
        let user = User::new(username, email, hashed);

        match self.user_repo.insert(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration
            Err(AuthError::UniqueViolation(field)) => {
                let mut errors = ValidationErrors::new();
                errors.add_taken(field.field_name(), field.taken_message());
                return Err(AuthError::Validation(errors));
            }
            Err(e) => return Err(e),
        }

        let session = self
            .sessions
            .establish(input.current_session.as_ref(), user.user_id)
            .await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { session, user })
    }

    /// Run Argon2 hashing on a blocking thread
    async fn hash_password(&self, password: RawPassword) -> AuthResult<UserPassword> {
        let pepper = self.config.password_pepper.clone();

        tokio::task::spawn_blocking(move || UserPassword::from_raw(&password, pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}
