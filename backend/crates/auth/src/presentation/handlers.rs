//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::application::{
    RegisterInput, RegisterUseCase, SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::session_id::SessionId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    RegisterRequest, RegisterResponse, SessionStatusResponse, SignInRequest, SignInResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl so `R` itself does not need to be Clone
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    fn sessions(&self) -> SessionManager<R> {
        SessionManager::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.sessions(), state.config.clone());

    let input = RegisterInput {
        username: req.username,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
        current_session: current_session_id(&state.config, &headers),
    };

    let output = use_case.execute(input).await?;

    let cookie = session_cookie(&state.config, &output.session);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(RegisterResponse {
            user_id: output.user.user_id.to_string(),
            username: output.user.username.as_str().to_string(),
            email: output.user.email.as_str().to_string(),
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.sessions(), state.config.clone());

    let input = SignInInput {
        identifier: req.identifier,
        password: req.password,
        current_session: current_session_id(&state.config, &headers),
    };

    let output = use_case.execute(input).await?;

    let cookie = session_cookie(&state.config, &output.session);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user_id: output.user.user_id.to_string(),
            username: output.user.username.as_str().to_string(),
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.sessions());

    let session_id = current_session_id(&state.config, &headers);
    use_case.execute(session_id.as_ref()).await?;

    let cookie = state.config.cookie().clear();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
///
/// Never fails for session reasons. A caller without a live session
/// gets a fresh anonymous one plus `authenticated: false`.
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionStore + Send + Sync + 'static,
{
    let sessions = state.sessions();

    let resolved = match current_session_id(&state.config, &headers) {
        Some(session_id) => sessions.resolve(&session_id).await?,
        None => None,
    };

    match resolved {
        Some(session) => {
            let user = match session.user_id {
                Some(user_id) => state.repo.find_by_id(&user_id).await?,
                None => None,
            };

            let body = match user {
                Some(user) => SessionStatusResponse {
                    authenticated: true,
                    user_id: Some(user.user_id.to_string()),
                    username: Some(user.username.as_str().to_string()),
                    expires_at: Some(session.expires_at),
                },
                None => SessionStatusResponse::anonymous(Some(session.expires_at)),
            };

            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => {
            let session = sessions.open_anonymous().await?;
            let cookie = session_cookie(&state.config, &session);

            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(SessionStatusResponse::anonymous(Some(session.expires_at))),
            )
                .into_response())
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn current_session_id(config: &AuthConfig, headers: &HeaderMap) -> Option<SessionId> {
    platform::cookie::extract_cookie(headers, &config.session_cookie_name).map(SessionId::from_token)
}

fn session_cookie(config: &AuthConfig, session: &Session) -> String {
    config
        .cookie()
        .issue(session.session_id.as_str(), Some(config.session_ttl_secs()))
}
