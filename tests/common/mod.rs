#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use school_api::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn empty_app() -> Router {
    app(AppState::new(MemoryStore::new()))
}

pub fn seeded_app() -> Router {
    app(AppState::new(MemoryStore::seeded()))
}

/// Send one request through the router. Non-JSON bodies come back as a JSON string.
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let response = router.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok(TestResponse { status, headers, body })
}

pub async fn send_raw(router: &Router, method: Method, uri: &str, raw: &'static str) -> Result<TestResponse> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))?;
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok(TestResponse { status, headers, body })
}

pub fn teacher(first: &str, last: &str, email: &str, class: &str, subject: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "email": email,
        "class": class,
        "subject": subject
    })
}

/// Create teachers and return their assigned ids in request order.
pub async fn create_teachers(router: &Router, teachers: Vec<Value>) -> Result<Vec<String>> {
    let resp = send(router, Method::POST, "/teachers/", Some(Value::Array(teachers))).await?;
    anyhow::ensure!(resp.status == StatusCode::CREATED, "create failed: {} {}", resp.status, resp.body);
    let ids = resp.body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    Ok(ids)
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

/// Send a body with no Content-Type header.
pub async fn send_untyped(router: &Router, method: Method, uri: &str, raw: &'static str) -> Result<TestResponse> {
    let request = Request::builder().method(method).uri(uri).body(Body::from(raw))?;
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok(TestResponse { status, headers, body })
}
