//! Backend registry.
//!
//! # Responsibilities
//! - Map short backend names to base URLs
//! - Join a base URL and a path tail with exactly one separator
//!
//! # Design Decisions
//! - Built once from config, immutable at runtime (shared via Arc)
//! - O(1) exact-match lookup via HashMap
//! - Unknown name is `None`, not an error; the relay decides what it means

use std::collections::HashMap;

use crate::config::BackendsConfig;

/// Immutable name → base URL mapping.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: HashMap<String, String>,
}

impl BackendRegistry {
    /// Build the registry from config.
    /// Trailing slashes are trimmed so [`BackendRegistry::target_url`] owns the separator.
    pub fn from_config(config: &BackendsConfig) -> Self {
        Self::new(config.0.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let backends = entries
            .into_iter()
            .map(|(name, base)| (name, base.trim_end_matches('/').to_string()))
            .collect();
        Self { backends }
    }

    /// Look up a backend's base URL.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.backends.get(name).map(String::as_str)
    }

    /// Downstream URL for `tail` on backend `name`: `base + "/" + tail`.
    ///
    /// `tail` is used byte-for-byte; no decoding or re-encoding.
    pub fn target_url(&self, name: &str, tail: &str) -> Option<String> {
        self.get(name).map(|base| format!("{}/{}", base, tail))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
