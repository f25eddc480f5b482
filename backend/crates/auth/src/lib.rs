//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration with username + email + password
//! - Login by username or email (one uniform identifier policy)
//! - Server-side sessions referenced by an opaque cookie token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Session id regenerated on login (session-fixation mitigation)
//! - Unknown identifiers verified against a decoy hash so login timing
//!   does not reveal whether an account exists
//! - Login failures never distinguish "no such account" from "wrong
//!   password"

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, SessionExpiry};
pub use application::session::SessionManager;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthStore;
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::AuthContext;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
