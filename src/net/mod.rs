//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → tls.rs (provision self-signed certificate if missing)
//!     → plain TCP listener bound by lifecycle::startup
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Certificate provisioning failure is logged, never fatal
//! - TLS termination is not performed by this process

pub mod tls;
