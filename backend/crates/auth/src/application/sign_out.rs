//! Sign Out Use Case
//!
//! Deletes the server-side session. Idempotent: signing out without a
//! session, or with a stale one, succeeds quietly.

use crate::application::session::SessionManager;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_id::SessionId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    sessions: SessionManager<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: SessionManager<S>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self, session_id: Option<&SessionId>) -> AuthResult<()> {
        if let Some(session_id) = session_id {
            self.sessions.clear(session_id).await?;
        }
        Ok(())
    }
}
