//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AUTH_REQUIRED_HEADER, AuthContext, AuthMiddlewareState, require_auth, resolve_session};
pub use router::{auth_router, auth_router_generic};
