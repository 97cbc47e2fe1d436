//! Account lifecycle integration tests
//!
//! Walks the wired services through the full flows: registration and
//! activation, login and sessions, password recovery, and the admin
//! disable/enable cascade. Expiry tests run on millisecond policies so
//! the suite stays fast.

mod common;

use assert_matches::assert_matches;
use chrono::Duration;
use keyward::auth::{AccountStatus, AuthPolicy};
use keyward::error::AuthError;

use common::{TestHarness, TEST_PASSWORD};

#[tokio::test]
async fn test_full_account_lifecycle() {
    let harness = TestHarness::new();

    let user = harness
        .auth
        .register("alice", "alice@example.com", TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.status, AccountStatus::Pending);

    // correct password, but the account has not been activated yet
    assert_matches!(
        harness.auth.login("alice", TEST_PASSWORD).await.unwrap_err(),
        AuthError::AccountNotActive
    );

    let token = harness.activation_token("alice@example.com").await;
    let user = harness.auth.activate(&token).await.unwrap();
    assert_eq!(user.status, AccountStatus::Active);

    let (handle, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
    let me = harness.auth.current_user(&handle).await.unwrap();
    assert_eq!(me.username, "alice");

    harness.auth.logout(&handle).await.unwrap();
    assert_matches!(
        harness.auth.current_user(&handle).await.unwrap_err(),
        AuthError::InvalidSession
    );
}

#[tokio::test]
async fn test_sliding_idle_window() {
    let harness = TestHarness::with(AuthPolicy::default(), Duration::milliseconds(400));
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let (handle, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();

    // each touch slides the window; total elapsed exceeds the timeout
    for _ in 0..4 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        harness.auth.current_user(&handle).await.unwrap();
    }

    // going quiet past the window expires the session
    tokio::time::sleep(std::time::Duration::from_millis(600)).await;
    assert_matches!(
        harness.auth.current_user(&handle).await.unwrap_err(),
        AuthError::ExpiredSession
    );

    // the expired handle was evicted; presenting it again is plain invalid
    assert_matches!(
        harness.auth.current_user(&handle).await.unwrap_err(),
        AuthError::InvalidSession
    );
}

#[tokio::test]
async fn test_activation_token_expiry_and_resend() {
    let harness = TestHarness::with(
        AuthPolicy {
            activation_ttl: Duration::milliseconds(30),
            ..AuthPolicy::default()
        },
        Duration::minutes(30),
    );
    harness
        .auth
        .register("alice", "alice@example.com", TEST_PASSWORD)
        .await
        .unwrap();
    let stale = harness.activation_token("alice@example.com").await;

    tokio::time::sleep(std::time::Duration::from_millis(80)).await;
    assert_matches!(
        harness.auth.activate(&stale).await.unwrap_err(),
        AuthError::TokenExpired
    );

    // the account is still pending and a resend opens a fresh window
    harness
        .auth
        .resend_activation("alice@example.com")
        .await
        .unwrap();
    let fresh = harness.activation_token("alice@example.com").await;
    assert_ne!(stale, fresh);
    let user = harness.auth.activate(&fresh).await.unwrap();
    assert_eq!(user.status, AccountStatus::Active);
}

#[tokio::test]
async fn test_password_reset_cuts_all_sessions() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    let (desktop, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
    let (phone, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();

    harness
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let token = harness.reset_token("alice@example.com").await;
    harness.auth.reset_password(&token, "Rotated9!").await.unwrap();

    for handle in [&desktop, &phone] {
        assert_matches!(
            harness.auth.current_user(handle).await.unwrap_err(),
            AuthError::InvalidSession
        );
    }
    assert_matches!(
        harness.auth.login("alice", TEST_PASSWORD).await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    harness.auth.login("alice", "Rotated9!").await.unwrap();
}

#[tokio::test]
async fn test_second_reset_request_supersedes_first() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    harness
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let first = harness.reset_token("alice@example.com").await;

    harness
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let second = harness.reset_token("alice@example.com").await;
    assert_ne!(first, second);

    assert_matches!(
        harness.auth.reset_password(&first, "Rotated9!").await.unwrap_err(),
        AuthError::TokenNotFound
    );
    harness.auth.reset_password(&second, "Rotated9!").await.unwrap();
}

#[tokio::test]
async fn test_disable_cascade_and_reenable() {
    let harness = TestHarness::new();
    let (_, admin_handle) = harness.seed_admin().await;
    let alice = harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    let (session, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
    harness
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let reset = harness.reset_token("alice@example.com").await;

    harness
        .admin
        .disable_account(&admin_handle, alice.id)
        .await
        .unwrap();

    // the live session died with the account
    assert_matches!(
        harness.auth.current_user(&session).await.unwrap_err(),
        AuthError::InvalidSession
    );
    // correct credentials now report the disabled state
    assert_matches!(
        harness.auth.login("alice", TEST_PASSWORD).await.unwrap_err(),
        AuthError::AccountDisabled
    );
    // so did the outstanding reset token (default policy)
    assert_matches!(
        harness.auth.reset_password(&reset, "Rotated9!").await.unwrap_err(),
        AuthError::TokenNotFound
    );

    harness
        .admin
        .enable_account(&admin_handle, alice.id)
        .await
        .unwrap();

    // enable restores login, not the revoked session or token
    assert_matches!(
        harness.auth.current_user(&session).await.unwrap_err(),
        AuthError::InvalidSession
    );
    assert_matches!(
        harness.auth.reset_password(&reset, "Rotated9!").await.unwrap_err(),
        AuthError::TokenNotFound
    );
    harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
}

#[tokio::test]
async fn test_disable_leaves_tokens_when_policy_says_so() {
    let harness = TestHarness::with(
        AuthPolicy {
            revoke_tokens_on_disable: false,
            ..AuthPolicy::default()
        },
        Duration::minutes(30),
    );
    let (_, admin_handle) = harness.seed_admin().await;
    let alice = harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    harness
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let reset = harness.reset_token("alice@example.com").await;

    harness
        .admin
        .disable_account(&admin_handle, alice.id)
        .await
        .unwrap();

    // sessions are always cut; the token survives under this policy
    harness.auth.reset_password(&reset, "Rotated9!").await.unwrap();
}

#[tokio::test]
async fn test_admin_audit_records_each_login() {
    let harness = TestHarness::new();
    let (_, admin_handle) = harness.seed_admin().await;
    let alice = harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    for _ in 0..3 {
        let (handle, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
        harness.auth.logout(&handle).await.unwrap();
    }
    // failed attempts never reach the audit log
    let _ = harness.auth.login("alice", "WrongPass1!").await;

    let events = harness
        .admin
        .list_login_activity(&admin_handle, alice.id)
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.windows(2).all(|pair| pair[0].at <= pair[1].at));
}

#[tokio::test]
async fn test_logout_everywhere_requires_live_session() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;

    let (first, _) = harness.auth.login("alice", TEST_PASSWORD).await.unwrap();
    harness.auth.logout(&first).await.unwrap();

    // a dead handle cannot authorize a mass revocation
    assert_matches!(
        harness.auth.logout_everywhere(&first).await.unwrap_err(),
        AuthError::InvalidSession
    );
}
