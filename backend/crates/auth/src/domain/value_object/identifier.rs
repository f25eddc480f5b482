//! Login Identifier Value Object
//!
//! One uniform identifier policy for every flow: raw input containing
//! `@` is treated as an email, anything else as a username. Both forms
//! resolve through the same store lookup, so username-login and
//! email-login behave identically everywhere.

use std::fmt;
use thiserror::Error;

use super::email::Email;
use super::username::Username;

/// Error returned when the identifier parses as neither form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid login identifier")]
pub struct IdentifierError;

/// Normalized login identifier (username or email)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Username(Username),
    Email(Email),
}

impl Identifier {
    /// Parse raw login input into a normalized identifier
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        if raw.contains('@') {
            Email::new(raw)
                .map(Identifier::Email)
                .map_err(|_| IdentifierError)
        } else {
            Username::new(raw)
                .map(Identifier::Username)
                .map_err(|_| IdentifierError)
        }
    }

    /// Normalized lookup key (canonical username or lowercase email)
    pub fn lookup_key(&self) -> &str {
        match self {
            Identifier::Username(u) => u.canonical(),
            Identifier::Email(e) => e.as_str(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Username(u) => write!(f, "{u}"),
            Identifier::Email(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_username() {
        let id = Identifier::parse("Alice").unwrap();
        assert!(matches!(id, Identifier::Username(_)));
        assert_eq!(id.lookup_key(), "alice");
    }

    #[test]
    fn test_parses_email() {
        let id = Identifier::parse("Alice@Example.com").unwrap();
        assert!(matches!(id, Identifier::Email(_)));
        assert_eq!(id.lookup_key(), "alice@example.com");
    }

    #[test]
    fn test_rejects_garbage_both_ways() {
        assert!(Identifier::parse("@@").is_err());
        assert!(Identifier::parse("!").is_err());
        assert!(Identifier::parse("").is_err());
    }
}
