//! Auth service unit tests.
//!
//! Each operation is exercised against a mocked credential store; the
//! stateful end-to-end flows live in `auth_flow_test.rs`.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use user_auth_service::domain::{Password, User};
use user_auth_service::errors::AppError;
use user_auth_service::infra::MockUserRepository;
use user_auth_service::services::{AuthService, Authenticator};

fn test_user(id: Uuid, email: &str, password_hash: &str) -> User {
    User {
        id,
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        session_id: None,
        reset_token: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service(store: MockUserRepository) -> Authenticator<MockUserRepository> {
    Authenticator::new(Arc::new(store))
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn test_register_hashes_password_before_insert() {
    let mut store = MockUserRepository::new();
    store
        .expect_find_by_email()
        .withf(|email| email == "a@x.com")
        .returning(|_| Ok(None));
    store
        .expect_create()
        .withf(|email, hash| {
            email == "a@x.com" && hash != "password123" && hash.starts_with("$argon2")
        })
        .returning(|email, hash| Ok(test_user(Uuid::new_v4(), &email, &hash)));

    let result = service(store)
        .register("a@x.com".to_string(), "password123".to_string())
        .await;

    let user = result.unwrap();
    assert_eq!(user.email, "a@x.com");
    assert!(user.session_id.is_none());
    assert!(user.reset_token.is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let mut store = MockUserRepository::new();
    store
        .expect_find_by_email()
        .returning(|email| Ok(Some(test_user(Uuid::new_v4(), email, "hash"))));
    // No expect_create: a duplicate must never reach the store's insert.

    let result = service(store)
        .register("a@x.com".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

// =============================================================================
// verify_login
// =============================================================================

#[tokio::test]
async fn test_verify_login_unknown_email_is_false_not_error() {
    let mut store = MockUserRepository::new();
    store.expect_find_by_email().returning(|_| Ok(None));

    let result = service(store).verify_login("nobody@x.com", "pw").await;

    assert!(!result.unwrap());
}

#[tokio::test]
async fn test_verify_login_checks_against_stored_hash() {
    let hash = Password::new("correct horse").unwrap().into_string();
    let stored = hash.clone();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_email()
        .returning(move |email| Ok(Some(test_user(Uuid::new_v4(), email, &stored))));

    let auth = service(store);
    assert!(auth.verify_login("a@x.com", "correct horse").await.unwrap());
    assert!(!auth.verify_login("a@x.com", "battery staple").await.unwrap());
}

// =============================================================================
// create_session
// =============================================================================

#[tokio::test]
async fn test_create_session_unknown_email_is_none() {
    let mut store = MockUserRepository::new();
    store.expect_find_by_email().returning(|_| Ok(None));

    let result = service(store).create_session("nobody@x.com").await;

    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn test_create_session_persists_a_fresh_token() {
    let user_id = Uuid::new_v4();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_email()
        .returning(move |email| Ok(Some(test_user(user_id, email, "hash"))));
    store
        .expect_update()
        .withf(move |id, changes| {
            *id == user_id
                && matches!(&changes.session_id, Some(Some(token)) if !token.is_empty())
                && changes.password_hash.is_none()
                && changes.reset_token.is_none()
        })
        .returning(move |id, _| Ok(test_user(id, "a@x.com", "hash")));

    let session_id = service(store).create_session("a@x.com").await.unwrap();

    let session_id = session_id.expect("registered email should get a session");
    assert!(Uuid::parse_str(&session_id).is_ok());
}

// =============================================================================
// resolve_session
// =============================================================================

#[tokio::test]
async fn test_resolve_session_empty_token_skips_the_store() {
    // No expectations: any store call would panic the mock.
    let store = MockUserRepository::new();

    let result = service(store).resolve_session("").await;

    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_session_miss_is_none_not_error() {
    let mut store = MockUserRepository::new();
    store.expect_find_by_session_id().returning(|_| Ok(None));

    let result = service(store).resolve_session("unknown-token").await;

    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_session_returns_the_holder() {
    let user_id = Uuid::new_v4();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_session_id()
        .withf(|session_id| session_id == "tok1")
        .returning(move |session_id| {
            let mut user = test_user(user_id, "a@x.com", "hash");
            user.session_id = Some(session_id.to_string());
            Ok(Some(user))
        });

    let user = service(store).resolve_session("tok1").await.unwrap();

    assert_eq!(user.unwrap().id, user_id);
}

// =============================================================================
// destroy_session
// =============================================================================

#[tokio::test]
async fn test_destroy_session_unknown_user_is_a_noop() {
    let mut store = MockUserRepository::new();
    store
        .expect_find_by_id()
        .returning(|_| Ok(None));
    // No expect_update: nothing to clear for an unknown id.

    let result = service(store).destroy_session(Uuid::new_v4()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_destroy_session_clears_only_the_session_field() {
    let user_id = Uuid::new_v4();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(move |id| {
            let mut user = test_user(id, "a@x.com", "hash");
            user.session_id = Some("tok1".to_string());
            Ok(Some(user))
        });
    store
        .expect_update()
        .withf(move |id, changes| {
            *id == user_id
                && changes.session_id == Some(None)
                && changes.password_hash.is_none()
                && changes.reset_token.is_none()
        })
        .returning(move |id, _| Ok(test_user(id, "a@x.com", "hash")));

    let result = service(store).destroy_session(user_id).await;

    assert!(result.is_ok());
}

// =============================================================================
// request_password_reset
// =============================================================================

#[tokio::test]
async fn test_reset_request_unknown_email_is_not_found() {
    let mut store = MockUserRepository::new();
    store.expect_find_by_email().returning(|_| Ok(None));

    let result = service(store).request_password_reset("nobody@x.com").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_reset_request_persists_the_issued_token() {
    let user_id = Uuid::new_v4();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_email()
        .returning(move |email| Ok(Some(test_user(user_id, email, "hash"))));
    store
        .expect_update()
        .withf(move |id, changes| {
            *id == user_id
                && matches!(&changes.reset_token, Some(Some(token)) if !token.is_empty())
                && changes.password_hash.is_none()
                && changes.session_id.is_none()
        })
        .returning(move |id, _| Ok(test_user(id, "a@x.com", "hash")));

    let token = service(store)
        .request_password_reset("a@x.com")
        .await
        .unwrap();

    assert!(Uuid::parse_str(&token).is_ok());
}

// =============================================================================
// reset_password
// =============================================================================

#[tokio::test]
async fn test_reset_password_invalid_token_is_not_found() {
    let mut store = MockUserRepository::new();
    store.expect_find_by_reset_token().returning(|_| Ok(None));

    let result = service(store).reset_password("bogus", "new password").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_reset_password_replaces_hash_and_consumes_token_together() {
    let user_id = Uuid::new_v4();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_reset_token()
        .withf(|token| token == "reset-tok")
        .returning(move |token| {
            let mut user = test_user(user_id, "a@x.com", "old-hash");
            user.reset_token = Some(token.to_string());
            Ok(Some(user))
        });
    store
        .expect_update()
        .withf(move |id, changes| {
            *id == user_id
                && matches!(&changes.password_hash, Some(hash) if hash.starts_with("$argon2"))
                && changes.reset_token == Some(None)
                && changes.session_id.is_none()
        })
        .returning(move |id, _| Ok(test_user(id, "a@x.com", "new-hash")));

    let result = service(store).reset_password("reset-tok", "new password").await;

    assert!(result.is_ok());
}
