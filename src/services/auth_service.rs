//! Authentication service - credential and session lifecycle.
//!
//! Stateless orchestration over the credential store: each operation is
//! one read, a decision, and at most one write. Uniqueness and
//! single-active-session invariants under concurrent callers belong to
//! the store's indexes and row updates, not to this layer.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{token, Password, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Authentication service trait for dependency injection.
///
/// Lookup misses split two ways (deliberately): `verify_login`,
/// `create_session`, `resolve_session` and `destroy_session` treat them
/// as normal outcomes and return a sentinel; the reset operations treat
/// them as `NotFound` errors because those flows require an existing
/// target.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user; fails with `Conflict` if the email is taken
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Check a password against the stored credentials.
    ///
    /// An unknown email is `Ok(false)`, never an error.
    async fn verify_login(&self, email: &str, password: &str) -> AppResult<bool>;

    /// Issue a new session token for the user, replacing any prior one.
    ///
    /// Returns `None` for an unknown email.
    async fn create_session(&self, email: &str) -> AppResult<Option<String>>;

    /// Look up the user holding the given session token.
    ///
    /// An empty token resolves to `None` without touching the store;
    /// an unmatched token is a normal `None` ("not authenticated").
    async fn resolve_session(&self, session_id: &str) -> AppResult<Option<User>>;

    /// Clear the user's session token.
    ///
    /// A no-op for an unknown user id; calling it twice is equally fine.
    async fn destroy_session(&self, user_id: Uuid) -> AppResult<()>;

    /// Issue a password-reset token; fails with `NotFound` for an
    /// unknown email
    async fn request_password_reset(&self, email: &str) -> AppResult<String>;

    /// Consume a reset token and store a new password hash.
    ///
    /// The token is cleared in the same update, so it is single-use;
    /// an unknown or already-consumed token fails with `NotFound`.
    async fn reset_password(&self, reset_token: &str, new_password: &str) -> AppResult<()>;
}

/// Concrete implementation of AuthService over an injected store handle.
pub struct Authenticator<R: UserRepository> {
    store: Arc<R>,
}

impl<R: UserRepository> Authenticator<R> {
    /// Create new auth service instance with a credential store handle
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for Authenticator<R> {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.store.create(email, password_hash).await
    }

    async fn verify_login(&self, email: &str, password: &str) -> AppResult<bool> {
        match self.store.find_by_email(email).await? {
            Some(user) => Ok(Password::from_hash(user.password_hash).verify(password)),
            None => Ok(false),
        }
    }

    async fn create_session(&self, email: &str) -> AppResult<Option<String>> {
        let Some(user) = self.store.find_by_email(email).await? else {
            return Ok(None);
        };

        let session_id = token::generate();
        self.store
            .update(
                user.id,
                UserChanges::default().session_id(Some(session_id.clone())),
            )
            .await?;

        Ok(Some(session_id))
    }

    async fn resolve_session(&self, session_id: &str) -> AppResult<Option<User>> {
        if session_id.is_empty() {
            return Ok(None);
        }
        self.store.find_by_session_id(session_id).await
    }

    async fn destroy_session(&self, user_id: Uuid) -> AppResult<()> {
        let Some(user) = self.store.find_by_id(user_id).await? else {
            return Ok(());
        };

        self.store
            .update(user.id, UserChanges::default().session_id(None))
            .await?;

        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<String> {
        let user = self.store.find_by_email(email).await?.ok_or_not_found()?;

        let reset_token = token::generate();
        self.store
            .update(
                user.id,
                UserChanges::default().reset_token(Some(reset_token.clone())),
            )
            .await?;

        Ok(reset_token)
    }

    async fn reset_password(&self, reset_token: &str, new_password: &str) -> AppResult<()> {
        let user = self
            .store
            .find_by_reset_token(reset_token)
            .await?
            .ok_or_not_found()?;

        let password_hash = Password::new(new_password)?.into_string();

        // Replace the hash and consume the token in a single update
        self.store
            .update(
                user.id,
                UserChanges::default()
                    .password_hash(password_hash)
                    .reset_token(None),
            )
            .await?;

        Ok(())
    }
}
