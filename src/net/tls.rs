//! Self-signed certificate bootstrap.
//!
//! Provisions `cert.pem`/`key.pem` with the `openssl` CLI when they are
//! missing. The listener does not terminate TLS; the files are there for a
//! TLS front (or a later switch) to pick up.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;

use crate::config::TlsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateStatus {
    /// Bootstrap turned off in config.
    Disabled,
    /// Certificate file already exists.
    Present,
    /// `openssl` produced a new certificate.
    Generated,
}

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("failed to create certificate directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run openssl: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("openssl exited with {0}")]
    OpenSsl(ExitStatus),
}

/// Generate a certificate if the configured one is missing.
pub async fn ensure_certificate(config: &TlsConfig) -> Result<CertificateStatus, CertificateError> {
    if !config.generate_certificate {
        return Ok(CertificateStatus::Disabled);
    }

    let cert_path = Path::new(&config.cert_path);
    if cert_path.exists() {
        return Ok(CertificateStatus::Present);
    }

    tracing::info!(cert = %config.cert_path, "Creating self-signed certificate");

    for file in [&config.cert_path, &config.key_path] {
        if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CertificateError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    let openssl_cnf = config
        .openssl_config_candidates
        .iter()
        .map(Path::new)
        .find(|p| p.exists());

    let status = Command::new("openssl")
        .args(openssl_args(config, openssl_cnf))
        .status()
        .await
        .map_err(CertificateError::Spawn)?;

    if !status.success() {
        return Err(CertificateError::OpenSsl(status));
    }

    tracing::info!(cert = %config.cert_path, key = %config.key_path, "Certificate created");
    Ok(CertificateStatus::Generated)
}

/// Arguments for `openssl req`: RSA-2048, 365 days, unencrypted key, CN=localhost.
pub fn openssl_args(config: &TlsConfig, openssl_cnf: Option<&Path>) -> Vec<String> {
    let mut args: Vec<String> = [
        "req", "-x509", "-newkey", "rsa:2048", "-keyout",
        config.key_path.as_str(),
        "-out",
        config.cert_path.as_str(),
        "-days", "365", "-nodes", "-subj", "/CN=localhost",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if let Some(cnf) = openssl_cnf {
        args.push("-config".to_string());
        args.push(cnf.display().to_string());
    }
    args
}
