//! Shared helpers for API integration tests
//!
//! Each [`TestApp`] owns a fresh SQLite file in a temp directory and drives
//! the full application (middleware included) through `OneshotRouter`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use recipe_server::db::repository::user;
use recipe_server::{Config, OneshotRouter, ServerState, build_app};
use serde_json::Value;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-characters";

pub struct TestApp {
    pub state: ServerState,
    pub app: Router<ServerState>,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("recipe-test.db");
        let config = Config::with_overrides(db_path.to_string_lossy(), JWT_SECRET);
        let state = ServerState::initialize(&config)
            .await
            .expect("initialize state");
        let app = build_app(&state);
        Self {
            state,
            app,
            _dir: dir,
        }
    }

    /// Insert a user directly and issue a token for it (no password hashing)
    pub async fn authenticated_user(&self, email: &str) -> (i64, String) {
        let created = user::create(&self.state.pool, email, "Test User", "unusable-hash")
            .await
            .expect("create user");
        let token = self
            .state
            .get_jwt_service()
            .generate_token(created.id, &created.email)
            .expect("token");
        (created.id, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send_raw(request).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .call_oneshot(&self.state, request)
            .await
            .expect("oneshot");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
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

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}

pub fn recipe_url(id: i64) -> String {
    format!("/api/recipe/recipes/{id}/")
}

pub fn tag_url(id: i64) -> String {
    format!("/api/recipe/tags/{id}/")
}

pub fn ingredient_url(id: i64) -> String {
    format!("/api/recipe/ingredients/{id}/")
}

/// Names of an array of `{id, name}` objects, in response order
pub fn names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .map(|a| a.iter().filter_map(|v| v["id"].as_i64()).collect())
        .unwrap_or_default()
}
