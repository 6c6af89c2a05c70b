//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (classify into a Route)
//!     → Route::Proxy: registry.rs (backend name → base URL)
//!
//! Registry Construction (at startup):
//!     [backends] table
//!     → trim trailing separators
//!     → Freeze as immutable BackendRegistry
//! ```
//!
//! # Design Decisions
//! - Registry compiled at startup, immutable at runtime
//! - No regex in hot path (exact and prefix matching only)
//! - Deterministic: same input always yields the same route

pub mod registry;
pub mod router;

pub use registry::BackendRegistry;
pub use router::{classify, Route};
