//! Authentication handlers.
//!
//! The session travels in the `session_id` cookie. The cookie carries no
//! Max-Age/Expires: a token stays valid until logout destroys it or a
//! password reset replaces the credentials.

use axum::{
    extract::{Extension, State},
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Email of the logged-in user
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "logged in")]
    pub message: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetRequest {
    /// Email of the account to reset
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Issued password-reset token
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetTokenResponse {
    /// Email of the account the token belongs to
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Single-use token authorizing one password change
    pub reset_token: String,
}

/// Password update request, consuming a reset token
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    /// Reset token issued for the account
    pub reset_token: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub new_password: String,
}

/// Authenticated user profile
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Email of the authenticated user
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/reset-password",
            post(request_password_reset).put(update_password),
        )
}

/// Create session-guarded routes (require a valid session cookie)
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .register(payload.email, payload.password)
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Login and start a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let valid = state
        .auth_service
        .verify_login(&payload.email, &payload.password)
        .await?;

    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    // The user can disappear between verification and session creation;
    // treat that race the same as a failed login.
    let session_id = state
        .auth_service
        .create_session(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            email: payload.email,
            message: "logged in".to_string(),
        }),
    ))
}

/// Logout and destroy the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 303, description = "Session destroyed, redirected to root"),
        (status = 403, description = "No valid session")
    ),
    security(("session_cookie" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state.auth_service.destroy_session(current_user.id).await?;

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");

    Ok((jar.remove(cookie), Redirect::to("/")))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Authenticated profile", body = ProfileResponse),
        (status = 403, description = "No valid session")
    ),
    security(("session_cookie" = []))
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse {
        email: current_user.email,
    }))
}

/// Request a password-reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Reset token issued", body = ResetTokenResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such user")
    )
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetRequest>,
) -> AppResult<Json<ResetTokenResponse>> {
    let reset_token = state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;

    Ok(Json(ResetTokenResponse {
        email: payload.email,
        reset_token,
    }))
}

/// Consume a reset token and update the password
#[utoipa::path(
    put,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Invalid or consumed reset token")
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .reset_password(&payload.reset_token, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
