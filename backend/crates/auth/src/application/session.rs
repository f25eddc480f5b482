//! Session Lifecycle Management
//!
//! One place owns session creation, resolution, rotation, and teardown
//! so the use cases and middleware all apply the same rules:
//!
//! - the session id rotates whenever privilege changes (login)
//! - an expired session is deleted on sight and treated as absent
//! - sliding expiry refreshes the deadline on each resolution

use std::sync::Arc;

use crate::application::config::{AuthConfig, SessionExpiry};
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

/// Session manager
pub struct SessionManager<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

// Manual impl so `S` itself does not need to be Clone
impl<S> Clone for SessionManager<S>
where
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SessionManager<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    /// Attach a verified user identity to a session
    ///
    /// The pre-auth session id is never kept: an existing session is
    /// rotated to a fresh id before the identity is attached, and when
    /// no session exists a fresh authenticated one is created. Either
    /// way the id returned here has never been seen unauthenticated.
    pub async fn establish(
        &self,
        current: Option<&SessionId>,
        user_id: UserId,
    ) -> AuthResult<Session> {
        if let Some(old_id) = current {
            if let Some(new_id) = self.store.rotate_id(old_id).await? {
                if let Some(mut session) = self.store.get(&new_id).await? {
                    session.user_id = Some(user_id);
                    session.refresh(self.config.session_ttl);
                    self.store.put(&session).await?;

                    tracing::info!(session_id = %session.session_id, "Session rotated on login");
                    return Ok(session);
                }
            }
        }

        let session = Session::authenticated(user_id, self.config.session_ttl);
        self.store.put(&session).await?;

        tracing::info!(session_id = %session.session_id, "Session established");
        Ok(session)
    }

    /// Resolve a session id to a live session
    ///
    /// Expired sessions are deleted and reported as `None`. Under
    /// sliding expiry a successful resolution pushes the deadline
    /// forward.
    pub async fn resolve(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let Some(mut session) = self.store.get(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.store.delete(session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Ok(None);
        }

        if self.config.session_expiry == SessionExpiry::Sliding {
            session.refresh(self.config.session_ttl);
            self.store.put(&session).await?;
        }

        Ok(Some(session))
    }

    /// Resolve a session id straight to the user behind it
    ///
    /// `None` for missing, expired, and anonymous sessions alike.
    pub async fn resolve_current_user(&self, session_id: &SessionId) -> AuthResult<Option<UserId>> {
        Ok(self.resolve(session_id).await?.and_then(|s| s.user_id))
    }

    /// Open a fresh anonymous session
    pub async fn open_anonymous(&self) -> AuthResult<Session> {
        let session = Session::anonymous(self.config.session_ttl);
        self.store.put(&session).await?;
        Ok(session)
    }

    /// Tear down a session (idempotent)
    pub async fn clear(&self, session_id: &SessionId) -> AuthResult<()> {
        self.store.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session cleared");
        Ok(())
    }

    /// Remove expired sessions from the store
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let removed = self.store.cleanup_expired().await?;
        if removed > 0 {
            tracing::info!(removed, "Cleaned up expired sessions");
        }
        Ok(removed)
    }
}
