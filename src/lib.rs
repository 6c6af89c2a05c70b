//! Local development host for LLM front-ends.
//!
//! Serves static assets, a small JSON API (secret lookup, template storage)
//! and a path-based relay to locally running inference backends.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod store;

pub use config::HostConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
