//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Certificate bootstrap → Metrics exporter → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: side files first, listener last
//! - In-flight relays are not cancelled on shutdown; they drain

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
