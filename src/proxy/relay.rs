//! Proxy relay.
//!
//! # Responsibilities
//! - Decompose `/api/proxy/<backend>/<rest...>` into backend name and tail
//! - Rebuild the downstream URL from the registry, byte-for-byte
//! - Forward method, body and `Content-Type` (nothing else)
//! - Buffer the whole downstream response and relay it with its status
//!
//! # Design Decisions
//! - One attempt, no retries, no streaming
//! - The whole exchange (connect, send, read body) shares one deadline
//! - Local failures are typed (see [`RelayError`]); downstream error statuses are not failures

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::ProxyConfig;
use crate::http::response::with_cors;
use crate::observability::metrics;
use crate::proxy::error::{error_chain, RelayError};
use crate::routing::BackendRegistry;

/// One inbound request bound for a backend.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub backend: String,
    /// Segments after the backend name, in order, undecoded.
    pub segments: Vec<String>,
    pub body: Option<Bytes>,
    pub content_type: Option<HeaderValue>,
}

impl ProxyRequest {
    /// Split a raw request target (path plus query) into backend and tail.
    ///
    /// `"/api/proxy/ollama/api/tags"` splits into
    /// `["", "api", "proxy", "ollama", "api", "tags"]`; fewer than five parts
    /// is a malformed path.
    pub fn parse(method: Method, raw_target: &str) -> Result<Self, RelayError> {
        let parts: Vec<&str> = raw_target.split('/').collect();
        if parts.len() < 5 {
            return Err(RelayError::MalformedPath);
        }
        Ok(Self {
            method,
            backend: parts[3].to_string(),
            segments: parts[4..].iter().map(|s| s.to_string()).collect(),
            body: None,
            content_type: None,
        })
    }

    pub fn with_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    pub fn with_content_type(mut self, content_type: Option<HeaderValue>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Segments rejoined exactly as received.
    pub fn tail(&self) -> String {
        self.segments.join("/")
    }
}

/// A fully buffered downstream response.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Bytes,
    pub content_type: HeaderValue,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let mut response = (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response();
        with_cors(response.headers_mut());
        response
    }
}

/// Forwards requests to registered backends.
#[derive(Clone)]
pub struct ProxyRelay {
    registry: Arc<BackendRegistry>,
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    preserve_content_type: bool,
}

impl ProxyRelay {
    pub fn new(registry: Arc<BackendRegistry>, config: &ProxyConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            registry,
            client,
            timeout: Duration::from_secs(config.timeout_secs),
            preserve_content_type: config.preserve_content_type,
        }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Downstream URL for a request, or `UnknownBackend`.
    pub fn target_url(&self, request: &ProxyRequest) -> Result<String, RelayError> {
        self.registry
            .target_url(&request.backend, &request.tail())
            .ok_or_else(|| RelayError::UnknownBackend(request.backend.clone()))
    }

    /// Execute one downstream exchange and buffer the result.
    pub async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, RelayError> {
        let start = Instant::now();
        let url = self.target_url(&request)?;

        tracing::info!(
            backend = %request.backend,
            method = %request.method,
            target = %url,
            "Relaying request"
        );

        let result = self.exchange(&request, &url).await;

        match &result {
            Ok(response) => {
                tracing::info!(
                    backend = %request.backend,
                    target = %url,
                    status = response.status.as_u16(),
                    bytes = response.body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Relay complete"
                );
                metrics::record_relay(&request.backend, "success", start);
            }
            Err(e) => {
                tracing::error!(
                    backend = %request.backend,
                    target = %url,
                    kind = e.kind(),
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Relay failed"
                );
                metrics::record_relay(&request.backend, e.kind(), start);
            }
        }

        result
    }

    async fn exchange(&self, request: &ProxyRequest, url: &str) -> Result<ProxyResponse, RelayError> {
        let uri: Uri = url.parse().map_err(|e: axum::http::uri::InvalidUri| {
            RelayError::InvalidTarget {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = Request::builder().method(request.method.clone()).uri(uri);
        if let Some(content_type) = &request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type.clone());
        }
        let body = match &request.body {
            Some(bytes) => Body::from(bytes.clone()),
            None => Body::empty(),
        };
        let outbound = builder.body(body).map_err(|e| RelayError::InvalidTarget {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let exchange = async {
            let response = self.client.request(outbound).await.map_err(|e| {
                let reason = error_chain(&e);
                if e.is_connect() {
                    RelayError::ConnectionFailure {
                        url: url.to_string(),
                        reason,
                    }
                } else {
                    RelayError::MalformedResponse {
                        url: url.to_string(),
                        reason,
                    }
                }
            })?;

            let (parts, body) = response.into_parts();
            let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
                .await
                .map_err(|e| RelayError::MalformedResponse {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

            let content_type = if self.preserve_content_type {
                parts
                    .headers
                    .get(header::CONTENT_TYPE)
                    .cloned()
                    .unwrap_or_else(json_content_type)
            } else {
                json_content_type()
            };

            Ok(ProxyResponse {
                status: parts.status,
                body: bytes,
                content_type,
            })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }),
        }
    }
}

fn json_content_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}
