//! User repository - the credential store contract and its SeaORM backing.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential store contract consumed by the services.
///
/// One typed finder per record field a caller may look up by; the update
/// surface is closed to the fields in [`UserChanges`]. Uniqueness of
/// email and of issued tokens under concurrent callers is the store's
/// responsibility (unique indexes), not the service's.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (case-sensitive, as stored)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the user holding the given session token
    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<User>>;

    /// Find the user holding the given reset token
    async fn find_by_reset_token(&self, reset_token: &str) -> AppResult<Option<User>>;

    /// Create a new user record with a store-assigned id and no tokens
    async fn create(&self, email: String, password_hash: String) -> AppResult<User>;

    /// Apply a partial update; fails with `NotFound` for an unknown id
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::SessionId.eq(session_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_reset_token(&self, reset_token: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::ResetToken.eq(reset_token))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            session_id: Set(None),
            reset_token: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(session_id) = changes.session_id {
            active.session_id = Set(session_id);
        }
        if let Some(reset_token) = changes.reset_token {
            active.reset_token = Set(reset_token);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
