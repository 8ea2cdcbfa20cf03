//! # integration-tests
//!
//! Shared fixtures: an in-memory application wired exactly like the binary,
//! plus request helpers for driving the router in tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_adapters::web::{self, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
use domains::ports::{CommentRepo, PasswordHasher, PostRepo, TokenIssuer, UserRepo};
use services::{CommentService, PostService, UserService};
use storage_adapters::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full application over an in-memory store, with a handle to the store
/// itself so tests can assert on raw records.
pub fn memory_app() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserRepo> = store.clone();
    let posts: Arc<dyn PostRepo> = store.clone();
    let comments: Arc<dyn CommentRepo> = store.clone();

    let passwords: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenService::new(TEST_SECRET));

    let state = AppState {
        users: UserService::new(users.clone(), passwords, tokens),
        posts: PostService::new(posts.clone(), comments.clone(), users.clone()),
        comments: CommentService::new(posts, comments, users),
    };
    (state, store)
}

/// The full application over an in-memory store.
pub fn memory_state() -> AppState {
    memory_app().0
}

pub fn test_app() -> (Router, AppState) {
    let state = memory_state();
    (web::router(state.clone()), state)
}

/// Sends one JSON request and returns the status plus the parsed body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Registers `<username>@example.com` and returns (user id, token).
pub async fn register(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["id"].as_str().unwrap().to_owned(),
        body["token"].as_str().unwrap().to_owned(),
    )
}

/// Creates a post and returns its id.
pub async fn create_post(app: &Router, token: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/posts",
        Some(token),
        Some(json!({ "title": title, "content": "body text" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post failed: {body}");
    body["id"].as_str().unwrap().to_owned()
}

/// Creates a comment and returns its id.
pub async fn create_comment(
    app: &Router,
    token: &str,
    post_id: &str,
    content: &str,
    is_markdown: bool,
) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/posts/{post_id}/comments"),
        Some(token),
        Some(json!({ "content": content, "is_markdown": is_markdown })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create comment failed: {body}");
    body["id"].as_str().unwrap().to_owned()
}
