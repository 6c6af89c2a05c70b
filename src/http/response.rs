//! Response construction shared by every handler.
//!
//! # Responsibilities
//! - Attach the wildcard cross-origin header
//! - Build the fixed CORS preflight response
//! - Build JSON and plain-text error responses
//!
//! # Design Decisions
//! - Permissive CORS is a local-dev policy, not a security boundary
//! - Error bodies are plain text carrying the error message

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Methods advertised in preflight responses.
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Request headers advertised in preflight responses.
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Add `Access-Control-Allow-Origin: *`.
pub fn with_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
}

/// 200 with the three CORS headers and no body.
pub fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
        .into_response()
}

/// 200 with raw JSON bytes.
pub fn json_bytes(body: impl Into<Body>) -> Response {
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body.into(),
    )
        .into_response();
    with_cors(response.headers_mut());
    response
}

/// 200 with a serialized value.
pub fn json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => json_bytes(bytes),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Plain-text error response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let mut response = (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message.into(),
    )
        .into_response();
    with_cors(response.headers_mut());
    response
}
