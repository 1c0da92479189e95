//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity.
///
/// `session_id` is present only while the user has an active session
/// (at most one per user); `reset_token` only while a password reset is
/// pending. Both are opaque random tokens issued by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique across users; stored and compared case-sensitively.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub session_id: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no active session or pending reset
    pub fn new(id: Uuid, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the user currently holds an active session
    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// Check whether a password reset is pending
    pub fn has_pending_reset(&self) -> bool {
        self.reset_token.is_some()
    }
}

/// Partial update of a user record.
///
/// This is the closed set of fields the credential store accepts for
/// updates; anything else on the record is immutable after creation.
/// For the nullable token columns the outer `Option` selects whether the
/// field is touched at all, the inner value is what gets stored (`None`
/// clears the column).
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub password_hash: Option<String>,
    pub session_id: Option<Option<String>>,
    pub reset_token: Option<Option<String>>,
}

impl UserChanges {
    /// Replace the stored password hash
    pub fn password_hash(mut self, hash: String) -> Self {
        self.password_hash = Some(hash);
        self
    }

    /// Set or clear the session token
    pub fn session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Set or clear the reset token
    pub fn reset_token(mut self, reset_token: Option<String>) -> Self {
        self.reset_token = Some(reset_token);
        self
    }

    /// True when no field would be touched
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none() && self.session_id.is_none() && self.reset_token.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_tokens() {
        let user = User::new(Uuid::new_v4(), "a@x.com".to_string(), "hash".to_string());
        assert!(!user.has_session());
        assert!(!user.has_pending_reset());
    }

    #[test]
    fn test_changes_builder() {
        let changes = UserChanges::default()
            .password_hash("h2".to_string())
            .reset_token(None);

        assert_eq!(changes.password_hash.as_deref(), Some("h2"));
        assert_eq!(changes.reset_token, Some(None));
        assert!(changes.session_id.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_default_changes_are_empty() {
        assert!(UserChanges::default().is_empty());
    }
}
