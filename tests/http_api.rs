//! HTTP API integration tests
//!
//! Exercises the endpoints over the full router: status codes, error
//! body shape, bearer authentication, and the mail-driven flows with
//! tokens captured from the test mailer.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use chrono::Duration;
use keyward::auth::AuthPolicy;
use pretty_assertions::assert_eq as assert_eq_pretty;
use serde_json::json;

use common::{auth_header, TestHarness, TEST_PASSWORD};

#[tokio::test]
async fn test_register_activate_login_me_logout_cycle() {
    let harness = TestHarness::new();
    let server = harness.server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["status"], "pending");
    assert!(body.get("password_hash").is_none());

    let token = harness.activation_token("alice@example.com").await;
    let response = server
        .post("/api/auth/activate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "active");

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "identifier": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let session = body["session"].as_str().expect("session handle").to_string();
    assert_eq!(body["user"]["username"], "alice");

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, auth_header(&session))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "alice@example.com");

    let response = server
        .post("/api/auth/logout")
        .add_header(AUTHORIZATION, auth_header(&session))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, auth_header(&session))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation_and_conflict() {
    let harness = TestHarness::new();
    let server = harness.server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "not-an-email",
            "password": TEST_PASSWORD
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().expect("error message").contains("email"));

    server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": TEST_PASSWORD
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_me_requires_valid_bearer() {
    let harness = TestHarness::new();
    let server = harness.server();

    let response = server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, "Bearer not-a-real-handle")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, "Token abc")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_credential_failures_share_one_body() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let server = harness.server();

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "alice", "password": "WrongPass1!" }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "mallory", "password": "WrongPass1!" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    let a: serde_json::Value = wrong_password.json();
    let b: serde_json::Value = unknown_user.json();
    assert_eq_pretty!(a, b);
}

#[tokio::test]
async fn test_pending_login_is_forbidden() {
    let harness = TestHarness::new();
    let server = harness.server();
    harness
        .auth
        .register("bob", "bob@example.com", TEST_PASSWORD)
        .await
        .unwrap();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "bob", "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_password_reset_http_cycle() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let server = harness.server();

    let known = server
        .post("/api/auth/password-reset/request")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    let unknown = server
        .post("/api/auth/password-reset/request")
        .json(&json!({ "email": "ghost@example.com" }))
        .await;
    assert_eq!(known.status_code(), StatusCode::ACCEPTED);
    assert_eq!(unknown.status_code(), StatusCode::ACCEPTED);
    // indistinguishable responses for known and unknown addresses
    let a: serde_json::Value = known.json();
    let b: serde_json::Value = unknown.json();
    assert_eq_pretty!(a, b);

    let token = harness.reset_token("alice@example.com").await;

    // a weak replacement is rejected without burning the token
    let response = server
        .post("/api/auth/password-reset/confirm")
        .json(&json!({ "token": token, "new_password": "short" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/auth/password-reset/confirm")
        .json(&json!({ "token": token, "new_password": "Rotated9!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // the token was consumed by the successful confirm
    let response = server
        .post("/api/auth/password-reset/confirm")
        .json(&json!({ "token": token, "new_password": "Rotated9!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "alice", "password": "Rotated9!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_activate_twice_conflicts() {
    let harness = TestHarness::new();
    let server = harness.server();
    harness
        .auth
        .register("alice", "alice@example.com", TEST_PASSWORD)
        .await
        .unwrap();
    let token = harness.activation_token("alice@example.com").await;

    let response = server
        .post("/api/auth/activate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .post("/api/auth/activate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_expired_token_is_gone() {
    let harness = TestHarness::with(
        AuthPolicy {
            activation_ttl: Duration::milliseconds(30),
            ..AuthPolicy::default()
        },
        Duration::minutes(30),
    );
    let server = harness.server();
    harness
        .auth
        .register("alice", "alice@example.com", TEST_PASSWORD)
        .await
        .unwrap();
    let token = harness.activation_token("alice@example.com").await;

    tokio::time::sleep(std::time::Duration::from_millis(80)).await;
    let response = server
        .post("/api/auth/activate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(response.status_code(), StatusCode::GONE);
}

#[tokio::test]
async fn test_admin_endpoints() {
    let harness = TestHarness::new();
    let (_, admin_handle) = harness.seed_admin().await;
    let alice = harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let server = harness.server();

    // a login to show up in the audit
    server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "alice", "password": TEST_PASSWORD }))
        .await;

    let response = server
        .post(&format!("/api/admin/users/{}/disable", alice.id))
        .add_header(AUTHORIZATION, auth_header(&admin_handle))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "alice", "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/api/admin/users/{}/enable", alice.id))
        .add_header(AUTHORIZATION, auth_header(&admin_handle))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .get(&format!("/api/admin/users/{}/logins", alice.id))
        .add_header(AUTHORIZATION, auth_header(&admin_handle))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], json!(alice.id));
    assert_eq!(body["count"], 1);

    let response = server
        .get(&format!(
            "/api/admin/users/{}/logins",
            uuid::Uuid::new_v4()
        ))
        .add_header(AUTHORIZATION, auth_header(&admin_handle))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_endpoints_reject_standard_users() {
    let harness = TestHarness::new();
    let alice = harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let server = harness.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "alice", "password": TEST_PASSWORD }))
        .await;
    let body: serde_json::Value = response.json();
    let session = body["session"].as_str().expect("session handle").to_string();

    let response = server
        .post(&format!("/api/admin/users/{}/disable", alice.id))
        .add_header(AUTHORIZATION, auth_header(&session))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_all_kills_every_session() {
    let harness = TestHarness::new();
    harness
        .register_and_activate("alice", "alice@example.com")
        .await;
    let server = harness.server();

    let mut sessions = Vec::new();
    for _ in 0..2 {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "identifier": "alice", "password": TEST_PASSWORD }))
            .await;
        let body: serde_json::Value = response.json();
        sessions.push(body["session"].as_str().expect("session handle").to_string());
    }

    let response = server
        .post("/api/auth/logout-all")
        .add_header(AUTHORIZATION, auth_header(&sessions[0]))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    for session in &sessions {
        let response = server
            .get("/api/auth/me")
            .add_header(AUTHORIZATION, auth_header(session))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unknown_route_falls_through_to_404() {
    let harness = TestHarness::new();
    let server = harness.server();

    let response = server.get("/api/auth/unknown").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
