//! Local file collaborators of the JSON API.
//!
//! # Data Flow
//! ```text
//! GET  /api/templates → templates.rs read  → bytes or {}
//! POST /api/templates → templates.rs write → validate → stage → rename
//! GET  /api/env       → secrets.rs         → {"apiKey": value | null}
//! ```
//!
//! # Design Decisions
//! - Missing or unreadable files degrade to defaults, never to HTTP errors
//! - Only template writes can fail a request

pub mod secrets;
pub mod templates;

pub use secrets::{EnvResponse, SecretReader};
pub use templates::{TemplateError, TemplateStore};
