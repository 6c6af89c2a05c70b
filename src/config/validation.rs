//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check backend names and base URLs
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::HostConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("no backends configured")]
    NoBackends,

    #[error("backend name '{0}' must be a lowercase identifier")]
    BackendName(String),

    #[error("backend '{name}' has invalid base url '{url}': {reason}")]
    BackendUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("proxy timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.backends.0.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    for (name, base_url) in &config.backends.0 {
        if !is_backend_name(name) {
            errors.push(ValidationError::BackendName(name.clone()));
        }
        if let Err(reason) = check_base_url(base_url) {
            errors.push(ValidationError::BackendUrl {
                name: name.clone(),
                url: base_url.clone(),
                reason,
            });
        }
    }

    if config.proxy.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_backend_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    // the relay client speaks plain HTTP only
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}
