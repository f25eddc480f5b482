//! Username Value Object
//!
//! The username is the public handle a user registers and logs in with.
//!
//! ## Normalization
//! Input is NFKC-normalized and trimmed; the original casing is kept for
//! display while a lowercase canonical form backs the uniqueness rule.
//!
//! ## Invariants
//! - Length: 3-30 characters after normalization
//! - Charset: a-z, 0-9, `_`, `.`, `-` (case-insensitive)
//! - Starts and ends with an alphanumeric or `_`
//! - No consecutive dots, no whitespace
//! - At least one alphanumeric character
//! - Not a reserved word

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Names that collide with routes or operational accounts
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "moderator",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "password",
    "user",
    "users",
    "account",
    "profile",
    "settings",
    "me",
    "anonymous",
    "guest",
    "null",
    "official",
];

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Empty after normalization
    Empty,
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
    /// Must start with alphanumeric or `_`
    InvalidStart { char: char },
    /// Must end with alphanumeric or `_`
    InvalidEnd { char: char },
    ConsecutiveDots,
    NoAlphanumeric,
    ContainsWhitespace,
    Reserved { word: String },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(
                    f,
                    "Username cannot start with '{char}'. Must start with a-z, 0-9, or _"
                )
            }
            Self::InvalidEnd { char } => {
                write!(
                    f,
                    "Username cannot end with '{char}'. Must end with a-z, 0-9, or _"
                )
            }
            Self::ConsecutiveDots => {
                write!(f, "Username cannot contain consecutive dots (..)")
            }
            Self::NoAlphanumeric => {
                write!(f, "Username must contain at least one letter or digit")
            }
            Self::ContainsWhitespace => {
                write!(f, "Username cannot contain whitespace")
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved username")
            }
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validated, normalized username
///
/// Stores both the user's input form (`original`, case preserved) and
/// the lowercase `canonical` form used for uniqueness and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Create a new Username from raw input
    ///
    /// Applies NFKC normalization and trimming, then validates.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized: String = raw.as_ref().trim().nfkc().collect();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(UsernameError::ContainsWhitespace);
        }

        let length = normalized.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        let canonical = normalized.to_lowercase();

        for (position, ch) in canonical.chars().enumerate() {
            let allowed = ch.is_ascii_lowercase()
                || ch.is_ascii_digit()
                || ALLOWED_SPECIAL_CHARS.contains(&ch);
            if !allowed {
                return Err(UsernameError::InvalidCharacter { char: ch, position });
            }
        }

        let first = canonical.chars().next().unwrap_or_default();
        if !(first.is_ascii_alphanumeric() || first == '_') {
            return Err(UsernameError::InvalidStart { char: first });
        }
        let last = canonical.chars().last().unwrap_or_default();
        if !(last.is_ascii_alphanumeric() || last == '_') {
            return Err(UsernameError::InvalidEnd { char: last });
        }

        if canonical.contains("..") {
            return Err(UsernameError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UsernameError::NoAlphanumeric);
        }

        if RESERVED_WORDS.contains(&canonical.as_str()) {
            return Err(UsernameError::Reserved { word: canonical });
        }

        Ok(Self {
            original: normalized,
            canonical,
        })
    }

    /// Rebuild from stored values (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Display form (case preserved)
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness and lookup
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "bob_42", "jane.doe", "a-b-c", "Alice"] {
            assert!(Username::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = Username::new("Alice").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let name = Username::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            Username::new("ab"),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("a".repeat(31)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            Username::new("al ice"),
            Err(UsernameError::ContainsWhitespace)
        ));
        assert!(matches!(
            Username::new("alice!"),
            Err(UsernameError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_boundary_characters() {
        assert!(matches!(
            Username::new(".alice"),
            Err(UsernameError::InvalidStart { .. })
        ));
        assert!(matches!(
            Username::new("alice-"),
            Err(UsernameError::InvalidEnd { .. })
        ));
    }

    #[test]
    fn test_consecutive_dots() {
        assert!(matches!(
            Username::new("a..b"),
            Err(UsernameError::ConsecutiveDots)
        ));
    }

    #[test]
    fn test_no_alphanumeric() {
        assert!(matches!(
            Username::new("___"),
            Err(UsernameError::NoAlphanumeric)
        ));
    }

    #[test]
    fn test_reserved_words() {
        assert!(matches!(
            Username::new("admin"),
            Err(UsernameError::Reserved { .. })
        ));
        // Reserved check applies to the canonical form
        assert!(matches!(
            Username::new("Admin"),
            Err(UsernameError::Reserved { .. })
        ));
    }
}
