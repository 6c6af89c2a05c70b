//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev host.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so the host runs without a config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the dev host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend registry: short name to base URL.
    pub backends: BackendsConfig,

    /// Proxy relay settings.
    pub proxy: ProxyConfig,

    /// Document root, template file and secret file locations.
    pub storage: StorageConfig,

    /// Self-signed certificate bootstrap.
    pub tls: TlsConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Backend base URLs keyed by the name used in `/api/proxy/<name>/...`.
///
/// Declaring a `[backends]` table replaces the defaults entirely.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BackendsConfig(pub BTreeMap<String, String>);

impl Default for BackendsConfig {
    fn default() -> Self {
        let mut backends = BTreeMap::new();
        backends.insert("ollama".to_string(), "http://127.0.0.1:11434".to_string());
        backends.insert("lmstudio".to_string(), "http://127.0.0.1:1234".to_string());
        Self(backends)
    }
}

/// Proxy relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upper bound for one downstream exchange in seconds.
    /// Generous because backends may cold-load very large models from disk.
    pub timeout_secs: u64,

    /// Relay the downstream `Content-Type` instead of forcing `application/json`.
    pub preserve_content_type: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 1200,
            preserve_content_type: false,
        }
    }
}

/// File locations used by the static, template and secret handlers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory served for unmatched GET requests.
    pub document_root: String,

    /// JSON file holding user-defined templates.
    pub templates_path: String,

    /// `KEY=value` file read by `GET /api/env`.
    pub env_file: String,

    /// Variable looked up in `env_file`.
    pub api_key_var: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            document_root: ".".to_string(),
            templates_path: "src/user_templates.json".to_string(),
            env_file: ".env".to_string(),
            api_key_var: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Certificate bootstrap configuration.
///
/// The listener itself always speaks plain HTTP; this only provisions the
/// files so a TLS front can be pointed at them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,

    /// Run `openssl` at startup when the certificate is missing.
    pub generate_certificate: bool,

    /// `openssl.cnf` locations tried in order; the first one found is passed
    /// with `-config`.
    pub openssl_config_candidates: Vec<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "server/cert.pem".to_string(),
            key_path: "server/key.pem".to_string(),
            generate_certificate: true,
            openssl_config_candidates: vec![
                r"C:\Program Files\Git\usr\ssl\openssl.cnf".to_string(),
                r"C:\Program Files\OpenSSL-Win64\bin\openssl.cnf".to_string(),
            ],
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024 * 1024, // chat payloads may carry images
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
