//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with one dispatch handler for every path
//! - Wire up middleware (tracing, body limit, request ID, CORS origin)
//! - Classify each request and hand it to the matching handler
//! - Serve static files for unmatched GETs
//! - Graceful shutdown on the lifecycle signal

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::HostConfig;
use crate::http::request::{read_declared_body, MakeRequestUuid, RequestIdExt};
use crate::http::response::{error_response, json, json_bytes, preflight};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::proxy::{ProxyRelay, ProxyRequest};
use crate::routing::{classify, BackendRegistry, Route};
use crate::store::{EnvResponse, SecretReader, TemplateStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: ProxyRelay,
    pub templates: Arc<TemplateStore>,
    pub secrets: Arc<SecretReader>,
    pub static_files: ServeDir,
}

impl AppState {
    pub fn from_config(config: &HostConfig) -> Self {
        let registry = Arc::new(BackendRegistry::from_config(&config.backends));
        let storage = &config.storage;

        Self {
            relay: ProxyRelay::new(registry, &config.proxy),
            templates: Arc::new(TemplateStore::new(&storage.templates_path)),
            secrets: Arc::new(SecretReader::new(&storage.env_file, storage.api_key_var.clone())),
            static_files: ServeDir::new(PathBuf::from(&storage.document_root)),
        }
    }
}

/// HTTP server for the dev host.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: HostConfig) -> Self {
        let state = AppState::from_config(&config);

        tracing::info!(
            backends = ?state.relay.registry().names(),
            document_root = %config.storage.document_root,
            proxy_timeout_secs = config.proxy.timeout_secs,
            "Configuration loaded"
        );

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &HostConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for driving the host without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown_rx` fires.
    /// Each connection is served on its own task.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

/// Single entry point: classify, then hand off.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let route = classify(request.method(), request.uri().path());

    tracing::debug!(
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
        route = route.label(),
        "Dispatching request"
    );

    let response = match route {
        Route::Preflight => preflight(),
        Route::Secret => json(&EnvResponse {
            api_key: state.secrets.read().await,
        }),
        Route::TemplatesRead => json_bytes(state.templates.read().await),
        Route::TemplatesWrite => write_templates(&state, request).await,
        Route::Proxy => proxy(&state, request).await,
        Route::StaticFile => serve_static(&state, request).await,
        Route::NotFound => error_response(StatusCode::NOT_FOUND, "Not Found"),
        Route::Unsupported => error_response(StatusCode::NOT_IMPLEMENTED, "Unsupported method"),
    };

    metrics::record_request(route.label(), response.status().as_u16(), start);
    response
}

async fn write_templates(state: &AppState, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = match read_declared_body(&parts.headers, body).await {
        Ok(body) => body.unwrap_or_default(),
        Err(e) => return e.into_response(),
    };

    match state.templates.write(&body).await {
        Ok(()) => json(&serde_json::json!({ "status": "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected template write");
            e.into_response()
        }
    }
}

async fn proxy(state: &AppState, request: Request<Body>) -> Response {
    let raw_target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path())
        .to_string();

    // Path shape and backend name are checked before the body is read.
    let proxy_request = match ProxyRequest::parse(request.method().clone(), &raw_target) {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };
    if let Err(e) = state.relay.target_url(&proxy_request) {
        tracing::warn!(backend = %proxy_request.backend, "Unknown backend");
        return e.into_response();
    }

    let (parts, body) = request.into_parts();
    let body = match read_declared_body(&parts.headers, body).await {
        Ok(body) => body,
        Err(e) => return e.into_response(),
    };
    let proxy_request = proxy_request
        .with_body(body)
        .with_content_type(parts.headers.get(header::CONTENT_TYPE).cloned());

    // The relay runs on its own task so a client disconnect, which drops this
    // future, does not drop the downstream call.
    let relay = state.relay.clone();
    let task = tokio::spawn(async move { relay.forward(proxy_request).await });

    match task.await {
        Ok(Ok(response)) => response.into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Relay task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Relay task failed")
        }
    }
}

async fn serve_static(state: &AppState, request: Request<Body>) -> Response {
    let result: Result<_, Infallible> = state.static_files.clone().oneshot(request).await;
    match result {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
