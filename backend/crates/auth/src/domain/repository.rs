//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    ///
    /// Uniqueness of username and email is enforced here; a collision
    /// surfaces as [`crate::error::AuthError::UniqueViolation`].
    async fn insert(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by normalized login key (canonical username or
    /// lowercase email)
    async fn find_by_identifier(&self, lookup_key: &str) -> AuthResult<Option<User>>;

    /// Check if canonical username is taken
    async fn exists_by_username(&self, canonical: &str) -> AuthResult<bool>;

    /// Check if normalized email is taken
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;
}

/// Session store trait
///
/// The store treats session ids as opaque keys. Lookups past expiry
/// are filtered by the caller, not the store.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Fetch a session by its id
    async fn get(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Insert or overwrite a session
    async fn put(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session (idempotent)
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Atomically move session data to a fresh id, invalidating the old
    /// one. Returns the new id, or `None` if the old id was not found.
    async fn rotate_id(&self, session_id: &SessionId) -> AuthResult<Option<SessionId>>;

    /// Delete all expired sessions, returning the count removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
