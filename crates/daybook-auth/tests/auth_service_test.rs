//! Integration tests for the authentication service.

use daybook_auth::config::AuthConfig;
use daybook_auth::error::AuthError;
use daybook_auth::service::{AuthService, LoginInput, RegisterInput};
use daybook_auth::token::{self, TokenKind};
use daybook_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

const GOOD_PASSWORD: &str = "Correct-Horse7-Battery";

fn test_config() -> AuthConfig {
    AuthConfig {
        access_token_secret: "access-secret-for-tests".into(),
        refresh_token_secret: "refresh-secret-for-tests".into(),
        access_token_lifetime_secs: 900,
        refresh_token_lifetime_secs: 604_800,
    }
}

/// Spin up an in-memory DB, run migrations, and build the service.
async fn setup() -> AuthService<SurrealUserRepository<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    daybook_db::run_migrations(&db).await.unwrap();

    AuthService::new(SurrealUserRepository::new(db), test_config())
}

fn alice() -> RegisterInput {
    RegisterInput {
        email: "alice@example.com".into(),
        password: GOOD_PASSWORD.into(),
        first_name: Some("Alice".into()),
        last_name: None,
    }
}

#[tokio::test]
async fn register_happy_path() {
    let svc = setup().await;

    let out = svc.register(alice()).await.unwrap();
    assert_eq!(out.user.email, "alice@example.com");
    assert!(!out.tokens.access_token.is_empty());
    assert!(!out.tokens.refresh_token.is_empty());

    // The stored credential is a hash, not the password.
    assert_ne!(out.user.password_hash, GOOD_PASSWORD);

    // The access token decodes and names the new user.
    let claims = token::verify_access(&out.tokens.access_token, svc.config()).unwrap();
    assert_eq!(claims.sub, out.user.id.to_string());
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.kind, TokenKind::Access);
}

#[tokio::test]
async fn register_duplicate_email_is_a_conflict() {
    let svc = setup().await;
    svc.register(alice()).await.unwrap();

    let err = svc.register(alice()).await.unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn register_weak_password_is_rejected_before_hashing() {
    let svc = setup().await;

    let err = svc
        .register(RegisterInput {
            password: "too-weak".into(),
            ..alice()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::WeakPassword(_)));

    // The account must not exist afterwards.
    let err = svc
        .login(LoginInput {
            email: "alice@example.com".into(),
            password: "too-weak".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_happy_path() {
    let svc = setup().await;
    let registered = svc.register(alice()).await.unwrap();

    let out = svc
        .login(LoginInput {
            email: "alice@example.com".into(),
            password: GOOD_PASSWORD.into(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, registered.user.id);
    assert!(!out.tokens.access_token.is_empty());
}

#[tokio::test]
async fn login_wrong_password_and_unknown_email_are_indistinguishable() {
    let svc = setup().await;
    svc.register(alice()).await.unwrap();

    let wrong_password = svc
        .login(LoginInput {
            email: "alice@example.com".into(),
            password: "Wrong-Horse7-Battery".into(),
        })
        .await
        .unwrap_err();

    let unknown_email = svc
        .login(LoginInput {
            email: "nobody@example.com".into(),
            password: GOOD_PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn refresh_issues_a_brand_new_pair() {
    let svc = setup().await;
    let registered = svc.register(alice()).await.unwrap();

    let refreshed = svc
        .refresh(&registered.tokens.refresh_token)
        .await
        .unwrap();

    assert_ne!(refreshed.access_token, registered.tokens.access_token);
    assert_ne!(refreshed.refresh_token, registered.tokens.refresh_token);

    let claims = token::verify_access(&refreshed.access_token, svc.config()).unwrap();
    assert_eq!(claims.sub, registered.user.id.to_string());
}

#[tokio::test]
async fn refresh_token_is_reusable_until_expiry() {
    // Nothing is invalidated server-side, so the same refresh token can
    // be exchanged repeatedly.
    let svc = setup().await;
    let registered = svc.register(alice()).await.unwrap();

    svc.refresh(&registered.tokens.refresh_token).await.unwrap();
    svc.refresh(&registered.tokens.refresh_token).await.unwrap();
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let svc = setup().await;
    let registered = svc.register(alice()).await.unwrap();

    let err = svc
        .refresh(&registered.tokens.access_token)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuthError::TokenInvalid(_) | AuthError::TokenExpired
    ));
}

#[tokio::test]
async fn refresh_rejects_garbage() {
    let svc = setup().await;

    let err = svc.refresh("totally-bogus-token").await.unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid(_)));
}

#[tokio::test]
async fn refresh_for_a_vanished_user_fails() {
    let svc = setup().await;

    // A well-formed refresh token whose subject never registered.
    let pair = token::issue_pair(Uuid::new_v4(), "ghost@example.com", svc.config()).unwrap();

    let err = svc.refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}
