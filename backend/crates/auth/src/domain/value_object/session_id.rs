//! Session ID Value Object
//!
//! An opaque bearer token. The core never parses it; validity is decided
//! solely by session store lookup. Inbound cookie values are accepted
//! as-is (a token that matches nothing simply resolves to anonymous).

use std::fmt;

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh unguessable id (256 bits of OS randomness)
    pub fn generate() -> Self {
        Self(platform::token::generate_session_token())
    }

    /// Wrap an inbound cookie value
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Session ids are bearer tokens; never print them whole
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "{prefix}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_display_redacts() {
        let id = SessionId::from_token("abcdefgh-the-rest-is-secret");
        let shown = id.to_string();
        assert!(shown.starts_with("abcdefgh"));
        assert!(!shown.contains("secret"));
    }
}
