//! Common test utilities for integration tests
//!
//! Each `TestContext` owns a router over its own in-memory store, so tests
//! are isolated and need no external services.

#![allow(dead_code)]

use accounts_api::app::{build_router, AppState};
use accounts_api::config::Config;
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use serde_json::{json, Value};
use tower::Service as _;

/// Test context containing the router under test
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

/// Status, headers and parsed body of one response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` when the body is empty
    pub body: Value,
}

impl TestResponse {
    /// Returns the `Location` header as a string
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestContext {
    /// Creates a new test context over an empty in-memory store
    pub fn new() -> Self {
        let config = Config::in_memory();
        let app = build_router(AppState::in_memory(config.clone()));

        TestContext { app, config }
    }

    /// Sends a request with an optional JSON body
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    /// Sends a prebuilt request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request("DELETE", uri, None).await
    }

    /// Creates a user and asserts it was accepted
    pub async fn create_user(&self, rut: &str, first_name: &str, email: &str) -> Value {
        let response = self.post("/api/v1/users", user_body(rut, first_name, email)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }

    /// Adds an address to a user, asserts it was accepted and returns its id
    pub async fn add_address(&self, rut: &str, street: &str) -> i64 {
        let response = self
            .post(
                &format!("/api/v1/users/{}/addresses", rut),
                address_body(street),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}

/// Create-user request body
pub fn user_body(rut: &str, first_name: &str, email: &str) -> Value {
    json!({
        "rut": rut,
        "first_name": first_name,
        "last_name": "Rojas",
        "email": email,
        "password": "secret"
    })
}

/// Address request body
pub fn address_body(street: &str) -> Value {
    json!({
        "street": street,
        "number": "10",
        "district": "D1",
        "city": "C1"
    })
}
