//! Proxy relay subsystem.
//!
//! # Data Flow
//! ```text
//! /api/proxy/<backend>/<rest...>
//!     → relay.rs ProxyRequest::parse (400 on short path)
//!     → registry lookup (404 on unknown backend)
//!     → one outbound request: method + body + Content-Type
//!     → buffer downstream status and body
//!     → ProxyResponse (status as-is) or RelayError (error.rs)
//! ```
//!
//! # Design Decisions
//! - No retries, no circuit breaking, no streaming
//! - Waiting on a slow backend parks only the request's task

pub mod error;
pub mod relay;

pub use error::RelayError;
pub use relay::{ProxyRelay, ProxyRequest, ProxyResponse};
