//! User Password Value Objects
//!
//! Two representations with a one-way bridge between them:
//! - [`RawPassword`]: policy-validated cleartext, zeroized on drop
//! - [`UserPassword`]: stored Argon2id hash in PHC string format
//!
//! The cleartext never leaves this module except through the hashing
//! path, and neither type ever prints its contents.

use std::fmt;

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

/// Policy-validated cleartext password (pre-hash)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate raw input against the password policy
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(raw.into())?))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(***)")
    }
}

/// Stored password hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated cleartext password (CPU-bound, call off the
    /// async runtime)
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        Ok(Self(raw.inner().hash(pepper)?))
    }

    /// Rebuild from a stored PHC string
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc)?))
    }

    /// The PHC string to persist
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-cost verification. Malformed stored hashes fail closed.
    pub fn verify(&self, candidate: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(candidate, pepper)
    }

    /// A real Argon2id hash that matches no password, used to equalize
    /// verification cost when the account lookup misses
    pub fn decoy() -> &'static HashedPassword {
        HashedPassword::decoy()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_applies_before_hashing() {
        assert!(RawPassword::new("short").is_err());
        assert!(RawPassword::new("correct horse battery").is_ok());
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        assert!(hashed.verify(raw.inner(), Some(b"pepper")));
        assert!(!hashed.verify(raw.inner(), Some(b"other-pepper")));
    }

    #[test]
    fn test_debug_redacts() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert_eq!(format!("{raw:?}"), "RawPassword(***)");
        assert_eq!(format!("{hashed:?}"), "UserPassword(***)");
    }
}
