//! In-Memory Repository Implementations
//!
//! Backing store for tests and local development. Enforces the same
//! uniqueness rules as the database so the use cases behave identically
//! against either implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::{AuthError, AuthResult, UniqueField};

/// In-memory user and session store
#[derive(Default)]
pub struct InMemoryAuthStore {
    users: Mutex<HashMap<UserId, User>>,
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, User>> {
        // A panicked holder cannot leave these maps half-written;
        // recover the data instead of propagating the poison
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserRepository for InMemoryAuthStore {
    async fn insert(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users();

        if users
            .values()
            .any(|u| u.username.canonical() == user.username.canonical())
        {
            return Err(AuthError::UniqueViolation(UniqueField::Username));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UniqueViolation(UniqueField::Email));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users().get(user_id).cloned())
    }

    async fn find_by_identifier(&self, lookup_key: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users()
            .values()
            .find(|u| u.username.canonical() == lookup_key || u.email.as_str() == lookup_key)
            .cloned())
    }

    async fn exists_by_username(&self, canonical: &str) -> AuthResult<bool> {
        Ok(self
            .users()
            .values()
            .any(|u| u.username.canonical() == canonical))
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        Ok(self.users().values().any(|u| u.email.as_str() == email))
    }
}

impl SessionStore for InMemoryAuthStore {
    async fn get(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        Ok(self.sessions().get(session_id).cloned())
    }

    async fn put(&self, session: &Session) -> AuthResult<()> {
        self.sessions()
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.sessions().remove(session_id);
        Ok(())
    }

    async fn rotate_id(&self, session_id: &SessionId) -> AuthResult<Option<SessionId>> {
        let mut sessions = self.sessions();

        let Some(mut session) = sessions.remove(session_id) else {
            return Ok(None);
        };

        let new_id = SessionId::generate();
        session.session_id = new_id.clone();
        sessions.insert(new_id.clone(), session);

        Ok(Some(new_id))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut sessions = self.sessions();
        let now = Utc::now();

        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at >= now);

        Ok((before - sessions.len()) as u64)
    }
}
