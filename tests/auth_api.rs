// =====================================================
// Auth API integration tests
// =====================================================
// register → login → me → refresh → logout over HTTP,
// plus every token failure mode as seen by a client.
// =====================================================

mod common;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use common::*;
use serde_json::json;
use uuid::Uuid;

use calculator_server::domains::auth::models::TokenType;

#[tokio::test]
async fn test_register_returns_public_user() {
    let app = TestApp::new();

    let response = app.register("alice").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["is_active"], true);
    assert_eq!(response.body["is_verified"], false);
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_is_rejected() {
    let app = TestApp::new();
    app.register("alice").await;

    let response = app.register("alice").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(error_message(&response).contains("already registered"));
}

#[tokio::test]
async fn test_register_validation_errors_are_422() {
    let app = TestApp::new();

    let mut weak = registration("bob");
    weak["password"] = json!("weakpassword123!");
    weak["confirm_password"] = json!("weakpassword123!");
    let response = app.post("/auth/register", None, weak).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&response), "Password must contain at least one uppercase letter");

    let mut mismatch = registration("bob");
    mismatch["confirm_password"] = json!("OtherPass123!");
    let response = app.post("/auth/register", None, mismatch).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&response), "Passwords do not match");
}

#[tokio::test]
async fn test_body_rejections_are_json_errors() {
    let app = TestApp::new();

    let response = app.post("/auth/register", None, json!({})).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.content_type.starts_with("application/json"), "{}", response.content_type);
    assert!(!error_message(&response).is_empty(), "{}", response.text);

    let response = app
        .request_raw(Method::POST, "/auth/login", None, "application/json", "{not json")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.content_type.starts_with("application/json"));
    assert!(!error_message(&response).is_empty());
}

#[tokio::test]
async fn test_login_returns_bearer_pair() {
    let app = TestApp::new();
    app.register("alice").await;

    let response = app.login("alice", TEST_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    assert!(response.body["expires_at"].as_i64().unwrap() > chrono::Utc::now().timestamp());
    assert_eq!(response.body["user"]["username"], "alice");
    assert!(!response.body["user"]["last_login"].is_null());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    app.register("alice").await;

    let response = app.login("alice", "WrongPass123!").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Incorrect username or password");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let response = app.get("/auth/me", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Not authenticated");

    let response = app.get("/auth/me", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Could not validate credentials");
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = TestApp::new();
    let (access, refresh) = app.register_and_login("alice").await;

    let me = app.get("/auth/me", Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "alice");

    let logout = app
        .post("/auth/logout", Some(&access), json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.get("/auth/me", Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&me), "Token has been revoked");

    let refreshed = app.post("/auth/refresh", None, json!({ "refresh_token": refresh })).await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&refreshed), "Token has been revoked");
}

#[tokio::test]
async fn test_logout_without_body() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app.request(Method::POST, "/auth/logout", Some(&access), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app.get("/auth/me", Some(&access)).await;
    assert_eq!(error_message(&me), "Token has been revoked");
}

#[tokio::test]
async fn test_logout_with_malformed_body_revokes_nothing() {
    let app = TestApp::new();
    let (access, refresh) = app.register_and_login("alice").await;

    let response = app
        .post("/auth/logout", Some(&access), json!({ "refresh_token": 5 }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.content_type.starts_with("application/json"));

    let response = app
        .request_raw(Method::POST, "/auth/logout", Some(&access), "text/plain", "refresh_token")
        .await;
    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(app.get("/auth/me", Some(&access)).await.status, StatusCode::OK);
    let refreshed = app.post("/auth/refresh", None, json!({ "refresh_token": refresh })).await;
    assert_eq!(refreshed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_invalid_refresh_token_keeps_session() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app
        .post("/auth/logout", Some(&access), json!({ "refresh_token": "garbage" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Could not validate credentials");

    assert_eq!(app.get("/auth/me", Some(&access)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_whitespace_body() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app
        .request_raw(Method::POST, "/auth/logout", Some(&access), "application/json", "  ")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app.get("/auth/me", Some(&access)).await;
    assert_eq!(error_message(&me), "Token has been revoked");
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = TestApp::new();
    let (_, refresh) = app.register_and_login("alice").await;

    let first = app.post("/auth/refresh", None, json!({ "refresh_token": refresh })).await;
    assert_eq!(first.status, StatusCode::OK);
    let new_access = first.body["access_token"].as_str().unwrap();
    assert_eq!(app.get("/auth/me", Some(new_access)).await.status, StatusCode::OK);

    let replay = app.post("/auth/refresh", None, json!({ "refresh_token": refresh })).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&replay), "Token has been revoked");
}

#[tokio::test]
async fn test_access_token_cannot_refresh_and_refresh_token_cannot_authenticate() {
    let app = TestApp::new();
    let (access, refresh) = app.register_and_login("alice").await;

    let response = app.post("/auth/refresh", None, json!({ "refresh_token": access })).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Could not validate credentials");

    let response = app.get("/auth/me", Some(&refresh)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Could not validate credentials");
}

#[tokio::test]
async fn test_expired_token_is_reported() {
    let app = TestApp::new();
    let response = app.register("alice").await;
    let user_id = response.body["id"].as_str().unwrap();

    let expired = app
        .state
        .auth_state
        .token_authority
        .create_token(user_id, TokenType::Access, Some(Duration::minutes(-1)))
        .unwrap();

    let response = app.get("/auth/me", Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Token has expired");
}

#[tokio::test]
async fn test_unknown_subject_and_bad_subject() {
    let app = TestApp::new();
    let tokens = &app.state.auth_state.token_authority;

    let ghost = tokens.create_token(Uuid::new_v4(), TokenType::Access, None).unwrap();
    let response = app.get("/auth/me", Some(&ghost)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&response), "User not found");

    let not_a_uuid = tokens.create_token("alice", TokenType::Access, None).unwrap();
    let response = app.get("/auth/me", Some(&not_a_uuid)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Could not process token");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app
        .post(
            "/auth/change-password",
            Some(&access),
            json!({
                "current_password": "WrongPass123!",
                "new_password": "NewSecure456@",
                "confirm_new_password": "NewSecure456@",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), "Current password is incorrect");

    let response = app
        .post(
            "/auth/change-password",
            Some(&access),
            json!({
                "current_password": TEST_PASSWORD,
                "new_password": TEST_PASSWORD,
                "confirm_new_password": TEST_PASSWORD,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&response), "New password must be different from current password");

    let response = app
        .post(
            "/auth/change-password",
            Some(&access),
            json!({
                "current_password": TEST_PASSWORD,
                "new_password": "NewSecure456@",
                "confirm_new_password": "NewSecure456@",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.login("alice", TEST_PASSWORD).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.login("alice", "NewSecure456@").await.status, StatusCode::OK);
}
