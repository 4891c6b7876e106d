#![allow(dead_code)]

use std::sync::Arc;

use application_station::{database::InMemoryStore, routes, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::{Layer, ServiceExt};
use tower_http::normalize_path::NormalizePathLayer;

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::seeded());
        let router = routes::app(AppState::new(store.clone()));
        Self { store, router }
    }

    /// Sends one request through the same path normalisation the server uses.
    /// Empty bodies come back as `JsonValue::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let app = NormalizePathLayer::trim_trailing_slash().layer(self.router.clone());
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, JsonValue) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, JsonValue) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers `email` with password "p" and returns the issued token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "p",
                    "first_name": "A",
                    "last_name": "B"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn company(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self.post("/companies", token, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    pub async fn job(&self, token: &str, company_id: i64) -> i64 {
        let (status, body) = self
            .post(
                "/jobs",
                token,
                json!({
                    "title": "Backend Engineer",
                    "description": "Rust services",
                    "link": "https://example.com/jobs/1",
                    "status_id": 1,
                    "company_id": company_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "job create failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn event(&self, token: &str, job_id: i64, start: &str, end: &str) -> i64 {
        let (status, body) = self
            .post(
                "/events",
                token,
                json!({
                    "details": "Phone screen",
                    "start_time": start,
                    "end_time": end,
                    "job_id": job_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "event create failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}
