//! Common test utilities for integration tests
//!
//! Each `TestApp` owns a private in-memory SQLite database migrated with
//! the real migrations, so tests run in parallel without a server.

#![allow(dead_code)]

use axum::{
    body::{Body, BodyDataStream},
    http::{Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use serde_json::Value;
use sqlx::SqlitePool;
use std::time::Duration;
use topweight_backend::{config::AppConfig, db, routes, state::AppState};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state.clone());

        Self { app, pool, state }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8_lossy(&body).into_owned();

        (status, body_str)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request and return the raw body bytes
    pub async fn get_bytes(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// Make a request with a JSON body
    pub async fn json(&self, method: &str, path: &str, body: &Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, String) {
        self.json("POST", path, body).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> (StatusCode, String) {
        self.json("PATCH", path, body).await
    }

    /// Make a PUT request with a raw body
    pub async fn put_bytes(&self, path: &str, content_type: &str, body: Vec<u8>) -> (StatusCode, String) {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn put(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Open the history event stream
    pub async fn open_event_stream(&self) -> EventStream {
        let request = Request::builder()
            .uri("/api/v1/history/events")
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/event-stream"
        );

        EventStream {
            body: response.into_body().into_data_stream(),
            buffer: String::new(),
        }
    }

    /// Create a user and return its id
    pub async fn create_user(&self, name: &str) -> String {
        let (status, body) = self
            .post("/api/v1/users", &serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        parse(&body)["id"].as_str().unwrap().to_string()
    }

    /// Create an exercise of the given kind and return its id
    pub async fn create_exercise(&self, name: &str, kind: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/exercises",
                &serde_json::json!({ "name": name, "kind": kind }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        parse(&body)["id"].as_str().unwrap().to_string()
    }
}

/// Client side of a Server-Sent Events response
pub struct EventStream {
    body: BodyDataStream,
    buffer: String,
}

/// One event read from an [`EventStream`]
#[derive(Debug)]
pub struct SseEvent {
    pub event: String,
    pub id: Option<String>,
    pub data: String,
}

impl EventStream {
    /// Next event, skipping keep-alive comments
    pub async fn next_event(&mut self) -> SseEvent {
        loop {
            if let Some(end) = self.buffer.find("\n\n") {
                let block: String = self.buffer.drain(..end + 2).collect();
                if block.lines().all(|line| line.is_empty() || line.starts_with(':')) {
                    continue;
                }
                return parse_event(&block);
            }

            let chunk = tokio::time::timeout(Duration::from_secs(5), self.body.next())
                .await
                .expect("timed out waiting for an event")
                .expect("event stream ended")
                .expect("event stream failed");
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }
}

fn parse_event(block: &str) -> SseEvent {
    let mut event = SseEvent {
        event: "message".to_string(),
        id: None,
        data: String::new(),
    };
    for line in block.lines() {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.strip_prefix(' ').unwrap_or(value);
        match name {
            "event" => event.event = value.to_string(),
            "id" => event.id = Some(value.to_string()),
            "data" => event.data.push_str(value),
            _ => {}
        }
    }
    event
}

pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, body))
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = 1;
    config
}
