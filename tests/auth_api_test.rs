mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_then_login_returns_the_same_token() {
    let app = TestApp::new();
    let token = app.register("a@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "token": token }));

    let (status, body) = app
        .send(
            Method::POST,
            "/api-token-auth",
            None,
            Some(json!({ "username": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], json!(token));
}

#[tokio::test]
async fn failed_login_is_a_valid_false_response() {
    let app = TestApp::new();
    app.register("a@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "a@x.com", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false }));

    let (status, _) = app
        .send(
            Method::POST,
            "/api-token-auth",
            None,
            Some(json!({ "username": "a@x.com", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_token() {
    let app = TestApp::new();
    app.register("a@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "email": "a@x.com",
                "password": "other",
                "first_name": "C",
                "last_name": "D"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], json!(false));
    assert!(body.get("token").is_none());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_registration_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "p", "first_name": "A", "last_name": "B" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], json!(false));

    let (status, body) = app
        .send(Method::POST, "/register", None, Some(json!({ "email": "a@x.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], json!(false));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new();
    let token = app.register("a@x.com").await;

    let (status, _) = app.send(Method::GET, "/jobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/jobs", "bogus").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/candidates/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("a@x.com"));
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn deleted_user_token_stops_working() {
    let app = TestApp::new();
    let token = app.register("a@x.com").await;
    let (_, me) = app.get("/candidates/me", &token).await;

    assert!(app.store.delete_user(me["user_id"].as_i64().unwrap()).await);
    let (status, _) = app.get("/candidates/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}
