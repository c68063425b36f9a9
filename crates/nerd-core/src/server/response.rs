//! Response projection
//!
//! The API family always answers with JSON. Mutations answer with the
//! `{success, error_msg?}` envelope; failed reads use the same envelope with
//! the status of the underlying error. The static family answers with file
//! bytes or a short `text/html` explanation.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::NerdError;

pub const INVALID_METHOD: &str = "Invalid HTTP-method";

/// `Retry-After` value sent with busy failures
const RETRY_AFTER_SECS: &str = "1";

/// A JSON body with the given status
pub fn json(status: StatusCode, value: Value) -> Response {
    (status, Json(value)).into_response()
}

/// `{"success": true}`
pub fn success() -> Response {
    json(StatusCode::OK, json!({ "success": true }))
}

/// `{"success": false, "error_msg": ...}` with the error's status
pub fn failure(err: &NerdError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::warn!(error = %err, status = status.as_u16(), "request failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "request rejected");
    }

    let mut response = json(
        status,
        json!({ "success": false, "error_msg": err.to_string() }),
    );
    if err.is_retryable() {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
    }
    response
}

/// Envelope for a mutation without a payload
pub fn outcome(result: crate::error::Result<()>) -> Response {
    match result {
        Ok(()) => success(),
        Err(e) => failure(&e),
    }
}

/// Method not allowed on an API route; carries no `success` key
pub fn invalid_method() -> Response {
    json(StatusCode::BAD_REQUEST, json!({ "error_msg": INVALID_METHOD }))
}

fn html(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/html"))],
        body,
    )
        .into_response()
}

pub fn bad_request(why: &str) -> Response {
    html(StatusCode::BAD_REQUEST, why.to_string())
}

pub fn not_found(target: &str) -> Response {
    html(
        StatusCode::NOT_FOUND,
        format!("The resource '{}' was not found.", target),
    )
}

pub fn server_error(what: &str) -> Response {
    html(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An error occurred: '{}'", what),
    )
}

/// File contents typed by `mime`. HEAD keeps the headers and drops the body.
pub fn file(mime: &str, bytes: Vec<u8>, head_only: bool) -> Response {
    let length = bytes.len();
    let body = if head_only {
        Body::empty()
    } else {
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}
