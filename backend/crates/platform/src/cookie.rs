//! Cookie Management Infrastructure
//!
//! Helpers for issuing, clearing, and reading the session cookie. The
//! cookie value is an opaque token; nothing here inspects it.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Session cookie settings
///
/// HttpOnly is not configurable: the session token must never be
/// readable from scripts.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl SessionCookie {
    /// Build a Set-Cookie value carrying `token`
    pub fn issue(&self, token: &str, max_age_secs: Option<i64>) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, token);

        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build a Set-Cookie value that removes the cookie
    pub fn clear(&self) -> String {
        format!("{}=; HttpOnly; Path={}; Max-Age=0", self.name, self.path)
    }

    /// Read this cookie's value from request headers
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.name)
    }

    /// Issue as a typed header value (empty value on the unlikely
    /// invalid-character case rather than panicking)
    pub fn issue_header(&self, token: &str, max_age_secs: Option<i64>) -> HeaderValue {
        HeaderValue::from_str(&self.issue(token, max_age_secs))
            .unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// Extract a cookie value by name from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_contains_attributes() {
        let cookie = SessionCookie {
            name: "sid".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/api".to_string(),
        };

        let value = cookie.issue("token123", Some(3600));
        assert!(value.starts_with("sid=token123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Secure"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/api"));
        assert!(value.contains("Max-Age=3600"));
    }

    #[test]
    fn test_issue_without_max_age() {
        let cookie = SessionCookie::default();
        let value = cookie.issue("t", None);
        assert!(!value.contains("Max-Age"));
    }

    #[test]
    fn test_clear_expires_immediately() {
        let cookie = SessionCookie::default();
        let value = cookie.clear();
        assert!(value.starts_with("session=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_uses_own_name() {
        let cookie = SessionCookie {
            name: "sid".to_string(),
            ..Default::default()
        };
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=tok"));
        assert_eq!(cookie.read(&headers), Some("tok".to_string()));
    }
}
