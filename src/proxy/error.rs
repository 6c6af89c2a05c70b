//! Relay failure taxonomy.
//!
//! Every way a relay can fail locally is a distinct variant with a
//! deliberate status code. A downstream response with an error status is not
//! a failure here: it is relayed as-is.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::error_response;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Fewer than five `/`-separated segments in the request target.
    #[error("Invalid path")]
    MalformedPath,

    /// Backend name not present in the registry.
    #[error("Backend not found: {0}")]
    UnknownBackend(String),

    /// The rebuilt downstream URL is not a valid URI.
    #[error("invalid downstream url {url}: {reason}")]
    InvalidTarget { url: String, reason: String },

    /// No complete response within the relay timeout.
    #[error("timed out after {}s waiting for {}", .after.as_secs(), .url)]
    Timeout { url: String, after: Duration },

    /// Connection refused, DNS failure, reset during connect.
    #[error("connection to {url} failed: {reason}")]
    ConnectionFailure { url: String, reason: String },

    /// The backend answered but the exchange could not be completed.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MalformedPath => StatusCode::BAD_REQUEST,
            RelayError::UnknownBackend(_) => StatusCode::NOT_FOUND,
            RelayError::InvalidTarget { .. }
            | RelayError::Timeout { .. }
            | RelayError::ConnectionFailure { .. }
            | RelayError::MalformedResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MalformedPath => "malformed_path",
            RelayError::UnknownBackend(_) => "unknown_backend",
            RelayError::InvalidTarget { .. } => "invalid_target",
            RelayError::Timeout { .. } => "timeout",
            RelayError::ConnectionFailure { .. } => "connection_failure",
            RelayError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

/// Render an error with its whole `source()` chain.
/// hyper's top-level messages ("client error (Connect)") say little on their own.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
