//! Session-cookie authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::errors::AppError;

/// Authenticated user resolved from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// Session authentication middleware.
///
/// Reads the session cookie, resolves it through the auth service, and
/// injects the CurrentUser into the request extensions. A missing cookie
/// and an unmatched token are both rejected with 403: either way the
/// caller is simply not authenticated.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

    let user = state
        .auth_service
        .resolve_session(&session_id)
        .await?
        .ok_or(AppError::Forbidden)?;

    let current_user = CurrentUser {
        id: user.id,
        email: user.email,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
