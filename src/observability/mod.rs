//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and relay produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) attached to every request and response
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
