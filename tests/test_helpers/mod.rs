//! Shared HTTP harness for integration tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use eyre::WrapErr;
use http_body_util::BodyExt;
use mockable::DefaultClock;
use serde_json::Value;
use taskboard::config::AllowedOrigin;
use taskboard::http::{AppState, router};
use taskboard::task::adapters::memory::InMemoryTaskRepository;
use tower::ServiceExt;

/// Builds the full router over an empty in-memory store.
pub fn app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    router(state, &AllowedOrigin::Any)
}

/// Sends one request through `app` and decodes the JSON response body.
///
/// An empty body decodes to [`Value::Null`].
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> eyre::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned())),
        None => builder.body(Body::empty()),
    }
    .wrap_err("build request")?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .wrap_err("route request")?;
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .wrap_err("read response body")?
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).wrap_err("decode response body")?
    };
    Ok((status, value))
}
