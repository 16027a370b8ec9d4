use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, pages};
use crate::services::AuthError;

/// Session key holding the logged-in username.
pub const SESSION_USER_KEY: &str = "usuario";

const LOGIN_ERROR: &str = "Usuário ou senha inválidos.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub senha: String,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::UserNotFound(name) => Self::not_found("User", name),
            AuthError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            AuthError::SelfDeletion => Self::Forbidden(err.to_string()),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// Username of the current session, if any.
pub async fn session_user(session: &Session) -> Option<String> {
    session
        .get::<String>(SESSION_USER_KEY)
        .await
        .ok()
        .flatten()
}

/// Username of the current session or 401.
pub async fn require_user(session: &Session) -> Result<String, ApiError> {
    session_user(session)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))
}

/// Session gate: redirects to `/login` unless a user is logged in.
pub async fn auth_middleware(session: Session, request: Request, next: Next) -> Response {
    match session_user(&session).await {
        Some(user) => {
            tracing::Span::current().record("usuario", user.as_str());
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// GET /
pub async fn index(session: Session) -> Redirect {
    if session_user(&session).await.is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// GET /login
pub async fn login_page(session: Session) -> Response {
    if session_user(&session).await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    pages::login(None).into_response()
}

/// POST /login
/// Failed logins re-render the form with an inline error.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state.auth_service().login(&form.usuario, &form.senha).await {
        Ok(user) => {
            session
                .cycle_id()
                .await
                .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
            session
                .insert(SESSION_USER_KEY, &user.username)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

            tracing::info!("User logged in: {}", user.username);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::debug!("Rejected login for '{}'", form.usuario);
            Ok(pages::login(Some(LOGIN_ERROR)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Redirect {
    let _ = session.flush().await;
    Redirect::to("/login")
}
