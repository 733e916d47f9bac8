//! Shared helpers for driving the router in integration tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use contact_book_api::repositories::ContactRepository;
use contact_book_api::{build_router, AppState, ContactServiceImpl, Environment};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over `repo` in the given deployment mode.
pub fn app_with(repo: Arc<dyn ContactRepository>, environment: Environment) -> Router {
    let service = Arc::new(ContactServiceImpl::new(repo));
    build_router(AppState::new(service, environment))
}

/// Send one request and decode the JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// A valid create body.
#[allow(dead_code)]
pub fn contact_body(first: &str, last: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": email,
        "phone": "+1234567890",
    })
}
