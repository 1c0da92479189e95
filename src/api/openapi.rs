//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::auth_handler;
use crate::config::SESSION_COOKIE;
use crate::domain::UserResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the User Auth Service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Auth Service",
        version = "0.1.0",
        description = "Credential and session management API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::me,
        auth_handler::request_password_reset,
        auth_handler::update_password,
    ),
    components(
        schemas(
            UserResponse,
            MessageResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            auth_handler::ResetRequest,
            auth_handler::ResetTokenResponse,
            auth_handler::UpdatePasswordRequest,
            auth_handler::ProfileResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, sessions, and password resets")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
