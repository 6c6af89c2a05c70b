//! Startup orchestration.
//!
//! # Responsibilities
//! - Provision the self-signed certificate (best effort)
//! - Install the metrics exporter when enabled
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast on bind errors; everything before the bind is best effort
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::HostConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::tls::{self, CertificateStatus};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the host until Ctrl+C / SIGTERM.
pub async fn run(config: HostConfig) -> Result<(), StartupError> {
    match tls::ensure_certificate(&config.tls).await {
        Ok(CertificateStatus::Generated) | Ok(CertificateStatus::Disabled) => {}
        Ok(CertificateStatus::Present) => {
            tracing::debug!(cert = %config.tls.cert_path, "Certificate already present");
        }
        Err(e) => tracing::warn!(error = %e, "Certificate bootstrap failed"),
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(
            address = %addr,
            url = %format!("http://127.0.0.1:{}", addr.port()),
            "Listening for connections"
        );
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config)
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
