//! Auth Middleware
//!
//! `resolve_session` turns the session cookie into an [`AuthContext`]
//! request extension; `require_auth` gates routes on it. Downstream
//! handlers take identity from the extension only, never from request
//! bodies or paths.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

/// Header set on 401 responses so clients can distinguish "log in
/// first" from other failures
pub const AUTH_REQUIRED_HEADER: &str = "X-Auth-Required";

/// Middleware state
pub struct AuthMiddlewareState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
}

// Manual impl so `S` itself does not need to be Clone
impl<S> Clone for AuthMiddlewareState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Caller identity resolved from the session cookie
///
/// Present on every request behind [`resolve_session`]. `user_id` is
/// `None` for anonymous callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<UserId>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Resolve the session cookie into an [`AuthContext`] extension
///
/// Never rejects: missing, stale, or expired sessions resolve to the
/// anonymous context and the request proceeds.
pub async fn resolve_session<S>(
    state: AuthMiddlewareState<S>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    let sessions = SessionManager::new(state.store.clone(), state.config.clone());

    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let context = match token {
        Some(token) => {
            let session_id = SessionId::from_token(token);
            match sessions.resolve(&session_id).await {
                Ok(Some(session)) => AuthContext {
                    user_id: session.user_id,
                },
                Ok(None) => AuthContext::anonymous(),
                Err(e) => {
                    // Store trouble must not let a request through as
                    // someone; treat as anonymous and let authorization
                    // deny it downstream
                    e.log();
                    AuthContext::anonymous()
                }
            }
        }
        None => AuthContext::anonymous(),
    };

    req.extensions_mut().insert(context);

    next.run(req).await
}

/// Reject unauthenticated requests with 401 and [`AUTH_REQUIRED_HEADER`]
///
/// Must be layered behind [`resolve_session`]; a request with no
/// [`AuthContext`] extension is treated as anonymous.
pub async fn require_auth(req: Request<Body>, next: Next) -> Result<Response, Response> {
    let authenticated = req
        .extensions()
        .get::<AuthContext>()
        .is_some_and(AuthContext::is_authenticated);

    if !authenticated {
        return Err((StatusCode::UNAUTHORIZED, [(AUTH_REQUIRED_HEADER, "true")]).into_response());
    }

    Ok(next.run(req).await)
}
