//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session expiration policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExpiry {
    /// Fixed lifetime from creation
    Absolute,
    /// Lifetime pushed forward on each authenticated request
    Sliding,
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session TTL
    pub session_ttl: Duration,
    /// Expiry policy (absolute or sliding)
    pub session_expiry: SessionExpiry,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Minimum password length; may raise the baseline policy but
    /// never lower it
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            session_ttl: Duration::hours(12),
            session_expiry: SessionExpiry::Sliding,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            password_min_length: platform::password::MIN_PASSWORD_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get session TTL in whole seconds (for cookie Max-Age)
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.num_seconds()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the cookie settings for this config
    pub fn cookie(&self) -> platform::cookie::SessionCookie {
        platform::cookie::SessionCookie {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}
