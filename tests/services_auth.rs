use chrono::{Duration, Utc};

use fenestra::auth::{self, Claims};
use fenestra::config::ServerConfig;
use fenestra::domain::session::NewSession;
use fenestra::forms::auth::{LoginForm, RegisterForm};
use fenestra::repository::{SessionWriter, UserReader};
use fenestra::services::auth::{ClientInfo, authenticate, login, logout, register};
use fenestra::services::ServiceError;

mod common;

const SECRET: &str = "integration-test-secret";

fn config() -> ServerConfig {
    ServerConfig::new(SECRET, 30)
}

fn register_form(email: &str, username: &str) -> RegisterForm {
    RegisterForm {
        email: email.to_string(),
        username: username.to_string(),
        password: "correct horse".to_string(),
        full_name: None,
    }
}

#[test]
fn test_first_registration_bootstraps_a_superuser() {
    let test_db = common::TestDb::new("test_first_registration_bootstraps_a_superuser.db");
    let repo = test_db.repo();

    let admin = register(&repo, None, register_form("admin@example.com", "admin")).unwrap();
    assert!(admin.is_superuser);

    // A second anonymous registration is rejected.
    let err = register(&repo, None, register_form("bob@example.com", "bob"))
        .expect_err("anonymous registration after bootstrap must fail");
    assert!(matches!(err, ServiceError::Unauthorized));

    // A superuser may register further accounts, which stay regular.
    let outcome = login(
        &repo,
        &config(),
        LoginForm {
            email: "admin@example.com".to_string(),
            password: "correct horse".to_string(),
        },
        ClientInfo::default(),
    )
    .unwrap();
    let requester = authenticate(&repo, SECRET, &outcome.token).unwrap();

    let bob = register(
        &repo,
        Some(&requester),
        register_form("bob@example.com", "bob"),
    )
    .unwrap();
    assert!(!bob.is_superuser);

    // Duplicate email is a conflict, not a silent overwrite.
    let err = register(
        &repo,
        Some(&requester),
        register_form("bob@example.com", "bobby"),
    )
    .expect_err("duplicate email must be rejected");
    assert!(matches!(err, ServiceError::Conflict));

    // A taken username under a fresh email is reported as a username clash,
    // not mistaken for an email conflict.
    let err = register(
        &repo,
        Some(&requester),
        register_form("robert@example.com", "bob"),
    )
    .expect_err("duplicate username must be rejected");
    assert!(matches!(err, ServiceError::Form(message) if message.contains("username")));
}

#[test]
fn test_login_issues_token_and_session_row() {
    let test_db = common::TestDb::new("test_login_issues_token_and_session_row.db");
    let repo = test_db.repo();

    register(&repo, None, register_form("admin@example.com", "admin")).unwrap();

    let err = login(
        &repo,
        &config(),
        LoginForm {
            email: "admin@example.com".to_string(),
            password: "wrong password".to_string(),
        },
        ClientInfo::default(),
    )
    .expect_err("wrong password must not log in");
    assert!(matches!(err, ServiceError::Unauthorized));

    let outcome = login(
        &repo,
        &config(),
        LoginForm {
            email: "Admin@Example.com".to_string(),
            password: "correct horse".to_string(),
        },
        ClientInfo {
            ip_address: Some("127.0.0.1".to_string()),
            user_agent: Some("tests".to_string()),
        },
    )
    .unwrap();
    assert_eq!(outcome.user.email, "admin@example.com");

    let user = authenticate(&repo, SECRET, &outcome.token).unwrap();
    assert_eq!(user.user_id, outcome.user.id);
    assert_eq!(user.token, outcome.token);
}

#[test]
fn test_logout_ends_access_while_the_token_is_still_valid() {
    let test_db = common::TestDb::new("test_logout_ends_access_while_token_valid.db");
    let repo = test_db.repo();

    register(&repo, None, register_form("admin@example.com", "admin")).unwrap();
    let outcome = login(
        &repo,
        &config(),
        LoginForm {
            email: "admin@example.com".to_string(),
            password: "correct horse".to_string(),
        },
        ClientInfo::default(),
    )
    .unwrap();

    assert!(authenticate(&repo, SECRET, &outcome.token).is_ok());

    logout(&repo, &outcome.token).unwrap();

    // The token still decodes, but the session row is gone from play.
    let err = authenticate(&repo, SECRET, &outcome.token)
        .expect_err("deactivated session must not authenticate");
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[test]
fn test_expired_session_row_is_rejected() {
    let test_db = common::TestDb::new("test_expired_session_row_is_rejected.db");
    let repo = test_db.repo();

    let admin = register(&repo, None, register_form("admin@example.com", "admin")).unwrap();

    // A structurally valid token whose backing row has already expired.
    let claims = Claims::new(admin.id, &admin.email, 30);
    let token = auth::issue_token(&claims, SECRET).unwrap();
    let expired_at = (Utc::now() - Duration::minutes(5)).naive_utc();
    repo.create_session(&NewSession::new(admin.id, &token, expired_at))
        .unwrap();

    let err = authenticate(&repo, SECRET, &token)
        .expect_err("expired session must not authenticate");
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[test]
fn test_token_signed_with_another_secret_is_rejected() {
    let test_db = common::TestDb::new("test_token_signed_with_another_secret_is_rejected.db");
    let repo = test_db.repo();

    let admin = register(&repo, None, register_form("admin@example.com", "admin")).unwrap();
    assert!(repo.get_user_by_id(admin.id).unwrap().is_some());

    let claims = Claims::new(admin.id, &admin.email, 30);
    let forged = auth::issue_token(&claims, "some-other-secret").unwrap();

    let err = authenticate(&repo, SECRET, &forged)
        .expect_err("forged token must not authenticate");
    assert!(matches!(err, ServiceError::Auth(_)));
}
