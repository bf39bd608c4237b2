// =====================================================
// Shared helpers for integration tests
// =====================================================
// Every test builds its own app over fresh in-memory stores,
// so tests never share users, tokens or calculations.
//
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = TestApp::new();
//     let tokens = app.register_and_login("alice").await;
//     // ...
// }
// ```
// =====================================================
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use calculator_server::create_app;
use calculator_server::shared::config::Config;
use calculator_server::shared::services::AppState;

pub const TEST_PASSWORD: &str = "SecurePass123!";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Status, headers and parsed JSON body (Null when the body is not JSON)
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Value,
    pub text: String,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory(Config::for_testing());
        let router = create_app(state.clone()).expect("app builds");
        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    /// Send a body verbatim, for payloads that are not valid JSON
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        content_type: &str,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .expect("valid request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, content_type, body, text }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn register(&self, username: &str) -> TestResponse {
        self.post("/auth/register", None, registration(username)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post(
            "/auth/login",
            None,
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Register then login, returning (access_token, refresh_token)
    pub async fn register_and_login(&self, username: &str) -> (String, String) {
        let response = self.register(username).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);

        let response = self.login(username, TEST_PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);

        (
            response.body["access_token"].as_str().expect("access token").to_string(),
            response.body["refresh_token"].as_str().expect("refresh token").to_string(),
        )
    }
}

pub fn registration(username: &str) -> Value {
    json!({
        "first_name": "Test",
        "last_name": "User",
        "email": format!("{}@example.com", username),
        "username": username,
        "password": TEST_PASSWORD,
        "confirm_password": TEST_PASSWORD,
    })
}

pub fn error_message(response: &TestResponse) -> &str {
    response.body["error"].as_str().unwrap_or_default()
}
