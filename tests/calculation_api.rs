// =====================================================
// Calculation API integration tests
// =====================================================
// CRUD over /calculations, always scoped to the caller.
// =====================================================

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_calculations_require_authentication() {
    let app = TestApp::new();

    let response = app.get("/calculations", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/calculations", None, json!({ "type": "addition", "inputs": [1, 2] }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_read_calculation() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let created = app
        .post(
            "/calculations",
            Some(&access),
            json!({ "type": "addition", "inputs": [10, 20, 5] }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["type"], "addition");
    assert_eq!(created.body["result"], 35.0);

    let id = created.body["id"].as_str().unwrap();
    let fetched = app.get(&format!("/calculations/{}", id), Some(&access)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["inputs"], json!([10.0, 20.0, 5.0]));
}

#[tokio::test]
async fn test_each_operation() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let cases = [
        ("addition", json!([10, 20, 5]), 35.0),
        ("subtraction", json!([100, 20, 10]), 70.0),
        ("multiplication", json!([2, 3, 4]), 24.0),
        ("division", json!([100, 2, 5]), 10.0),
    ];

    for (kind, inputs, expected) in cases {
        let response = app
            .post("/calculations", Some(&access), json!({ "type": kind, "inputs": inputs }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", kind);
        assert_eq!(response.body["result"], expected, "{}", kind);
    }
}

#[tokio::test]
async fn test_invalid_inputs_are_422() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app
        .post("/calculations", Some(&access), json!({ "type": "division", "inputs": [10, 0] }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&response), "Cannot divide by zero");

    let response = app
        .post("/calculations", Some(&access), json!({ "type": "addition", "inputs": [10] }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&response), "Inputs must contain at least two numbers");
}

#[tokio::test]
async fn test_extractor_rejections_are_json_errors() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app
        .post("/calculations", Some(&access), json!({ "type": "modulo", "inputs": [1, 2] }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.content_type.starts_with("application/json"), "{}", response.content_type);
    assert!(!error_message(&response).is_empty(), "{}", response.text);

    let response = app.get("/calculations/not-a-uuid", Some(&access)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.content_type.starts_with("application/json"));
    assert!(!error_message(&response).is_empty(), "{}", response.text);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    for inputs in [json!([1, 1]), json!([2, 2]), json!([3, 3])] {
        app.post("/calculations", Some(&access), json!({ "type": "addition", "inputs": inputs }))
            .await;
    }

    let response = app.get("/calculations", Some(&access)).await;
    assert_eq!(response.status, StatusCode::OK);
    let results: Vec<f64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|calc| calc["result"].as_f64().unwrap())
        .collect();
    assert_eq!(results, vec![6.0, 4.0, 2.0]);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;
    let created = app
        .post("/calculations", Some(&access), json!({ "type": "multiplication", "inputs": [2, 3] }))
        .await;
    let uri = format!("/calculations/{}", created.body["id"].as_str().unwrap());

    let updated = app
        .request(Method::PUT, &uri, Some(&access), Some(json!({ "inputs": [4, 5] })))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["result"], 20.0);
    assert_eq!(updated.body["type"], "multiplication");

    let deleted = app.request(Method::DELETE, &uri, Some(&access), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app.get(&uri, Some(&access)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&missing), "Calculation not found");
}

#[tokio::test]
async fn test_other_users_calculations_are_hidden() {
    let app = TestApp::new();
    let (alice, _) = app.register_and_login("alice").await;
    let (bob, _) = app.register_and_login("bob").await;

    let created = app
        .post("/calculations", Some(&alice), json!({ "type": "addition", "inputs": [1, 2] }))
        .await;
    let uri = format!("/calculations/{}", created.body["id"].as_str().unwrap());

    assert_eq!(app.get(&uri, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.request(Method::PUT, &uri, Some(&bob), Some(json!({ "inputs": [9, 9] }))).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.request(Method::DELETE, &uri, Some(&bob), None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/calculations", Some(&bob)).await.body, json!([]));

    assert_eq!(app.get(&uri, Some(&alice)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = TestApp::new();
    let (access, _) = app.register_and_login("alice").await;

    let response = app.get(&format!("/calculations/{}", Uuid::new_v4()), Some(&access)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
