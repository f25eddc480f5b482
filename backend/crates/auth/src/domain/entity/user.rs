//! User Entity
//!
//! A registered account. The password is carried only as its stored
//! hash; cleartext never reaches this type.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword, username::Username,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Public handle (unique, for login and display)
    pub username: Username,
    /// Email address (unique, alternative login identifier)
    pub email: Email,
    /// Argon2id hash in PHC string format
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from validated registration values
    pub fn new(username: Username, email: Email, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    #[test]
    fn test_new_user_has_fresh_id_and_timestamps() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let password = UserPassword::from_raw(&raw, None).unwrap();
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            password,
        );

        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.username.as_str(), "alice");
    }
}
