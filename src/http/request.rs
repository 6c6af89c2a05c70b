//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for requests that lack one
//! - Expose the request ID to handlers for log correlation
//! - Read request bodies the way the API expects (declared length only)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body size limit enforced by middleware before handlers run
//! - Bodies without a nonzero `Content-Length` are treated as absent

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::error_response;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates `x-request-id` values for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Access the request ID set by the middleware.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Error)]
#[error("failed to read request body: {0}")]
pub struct BodyError(#[from] axum::Error);

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// Declared body length, if the header is present and parses.
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Read the whole body up-front when `Content-Length` is present and nonzero.
pub async fn read_declared_body(headers: &HeaderMap, body: Body) -> Result<Option<Bytes>, BodyError> {
    match content_length(headers) {
        Some(len) if len > 0 => {
            let bytes = axum::body::to_bytes(body, usize::MAX).await?;
            Ok(Some(bytes))
        }
        _ => Ok(None),
    }
}
