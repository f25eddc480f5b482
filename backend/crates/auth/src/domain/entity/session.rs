//! Session Entity
//!
//! A server-side session keyed by an opaque bearer token. Sessions
//! start anonymous and become authenticated when a user id is attached
//! after credential verification.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token (cookie value)
    pub session_id: SessionId,
    /// `None` while the session is anonymous
    pub user_id: Option<UserId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new anonymous session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn anonymous(ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::generate(),
            user_id: None,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Create a new authenticated session for a user
    pub fn authenticated(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::generate(),
            user_id: Some(user_id),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if session carries no user identity
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Push expiration forward (sliding-expiry mode)
    pub fn refresh(&mut self, ttl: Duration) {
        self.expires_at = Utc::now() + ttl;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous(Duration::hours(1));
        assert!(session.is_anonymous());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_authenticated_session() {
        let user_id = UserId::new();
        let session = Session::authenticated(user_id, Duration::hours(1));
        assert_eq!(session.user_id, Some(user_id));
        assert!(!session.is_anonymous());
    }

    #[test]
    fn test_expiry() {
        let session = Session::anonymous(Duration::seconds(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_refresh_extends_expiry() {
        let mut session = Session::anonymous(Duration::seconds(1));
        let before = session.expires_at;
        session.refresh(Duration::hours(1));
        assert!(session.expires_at > before);
    }
}
