//! Sign In Use Case
//!
//! Verifies credentials and establishes an authenticated session.
//!
//! Every failure mode (unknown identifier, wrong password, malformed
//! input) collapses into [`AuthError::InvalidCredentials`], and a miss
//! on the account lookup still runs a full Argon2 verification against
//! a decoy hash so response timing does not reveal which identifiers
//! exist.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{
    identifier::Identifier, session_id::SessionId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Username or email
    pub identifier: String,
    /// Password
    pub password: String,
    /// The caller's current session id, if any (rotated on success)
    pub current_session: Option<SessionId>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// The freshly established session
    pub session: Session,
    /// The authenticated user
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user = match Identifier::parse(&input.identifier) {
            Ok(identifier) => {
                self.user_repo
                    .find_by_identifier(identifier.lookup_key())
                    .await?
            }
            // Unparseable identifier can match no account; fall through
            // to the decoy path so the cost profile stays flat
            Err(_) => None,
        };

        let verified = self.verify_password(input.password, user.as_ref()).await?;

        let user = match (user, verified) {
            (Some(user), true) => user,
            _ => {
                tracing::debug!("Sign in rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let session = self
            .sessions
            .establish(input.current_session.as_ref(), user.user_id)
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { session, user })
    }

    /// Run Argon2 verification on a blocking thread
    ///
    /// When no account matched, the candidate is verified against the
    /// decoy hash and the result discarded, so both branches pay the
    /// same hashing cost.
    async fn verify_password(&self, password: String, user: Option<&User>) -> AuthResult<bool> {
        let Ok(candidate) = ClearTextPassword::new(password) else {
            // Could never have been registered; burn the same cost anyway
            if let Ok(fallback) = ClearTextPassword::new("decoy-candidate-input".to_string()) {
                self.burn_decoy_cost(fallback).await?;
            }
            return Ok(false);
        };

        match user {
            Some(user) => {
                let hash = user.password.clone();
                let pepper = self.config.password_pepper.clone();
                tokio::task::spawn_blocking(move || hash.verify(&candidate, pepper.as_deref()))
                    .await
                    .map_err(|e| AuthError::Internal(e.to_string()))
            }
            None => self.burn_decoy_cost(candidate).await.map(|_| false),
        }
    }

    async fn burn_decoy_cost(&self, candidate: ClearTextPassword) -> AuthResult<()> {
        #[cfg(test)]
        decoy_verifications::COUNT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let decoy = UserPassword::decoy().clone();
        let pepper = self.config.password_pepper.clone();

        tokio::task::spawn_blocking(move || {
            let _ = decoy.verify(&candidate, pepper.as_deref());
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

/// Counter visible to tests so they can assert the miss path really
/// pays a decoy verification instead of returning early
#[cfg(test)]
pub(crate) mod decoy_verifications {
    use std::sync::atomic::AtomicUsize;

    pub(crate) static COUNT: AtomicUsize = AtomicUsize::new(0);
}
