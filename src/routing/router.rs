//! Path router.
//!
//! # Responsibilities
//! - Classify an inbound (method, path) into exactly one [`Route`]
//! - Preflight (OPTIONS) wins over every other rule
//!
//! # Design Decisions
//! - Exact path match for the JSON API, prefix match for the proxy
//! - No regex, no wildcard patterns
//! - Pure function of method and path; the handler owns the I/O

use axum::http::Method;

/// Path prefix that selects the proxy relay.
pub const PROXY_PREFIX: &str = "/api/proxy/";

/// Secret endpoint.
pub const ENV_PATH: &str = "/api/env";

/// Template store endpoint.
pub const TEMPLATES_PATH: &str = "/api/templates";

/// Dispatch target for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight, any path.
    Preflight,
    /// `GET /api/env`
    Secret,
    /// `GET /api/templates`
    TemplatesRead,
    /// `POST /api/templates`
    TemplatesWrite,
    /// `GET|POST /api/proxy/...`
    Proxy,
    /// Any other GET.
    StaticFile,
    /// Any other POST.
    NotFound,
    /// Methods the host does not serve.
    Unsupported,
}

impl Route {
    /// Label used for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Secret => "env",
            Route::TemplatesRead => "templates_read",
            Route::TemplatesWrite => "templates_write",
            Route::Proxy => "proxy",
            Route::StaticFile => "static",
            Route::NotFound => "not_found",
            Route::Unsupported => "unsupported",
        }
    }
}

/// Classify a request. `path` excludes the query string.
pub fn classify(method: &Method, path: &str) -> Route {
    if *method == Method::OPTIONS {
        return Route::Preflight;
    }

    if *method == Method::GET {
        if path == ENV_PATH {
            Route::Secret
        } else if path.starts_with(PROXY_PREFIX) {
            Route::Proxy
        } else if path == TEMPLATES_PATH {
            Route::TemplatesRead
        } else {
            Route::StaticFile
        }
    } else if *method == Method::POST {
        if path.starts_with(PROXY_PREFIX) {
            Route::Proxy
        } else if path == TEMPLATES_PATH {
            Route::TemplatesWrite
        } else {
            Route::NotFound
        }
    } else if *method == Method::HEAD {
        Route::StaticFile
    } else {
        Route::Unsupported
    }
}
