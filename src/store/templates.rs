//! Template store: one JSON document on disk, read and replaced wholesale.
//!
//! Writes validate first, then go to a sibling temporary file that is renamed
//! over the target while holding the write lock. Readers never take the lock;
//! the rename means they see either the old document or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

use crate::http::response::error_response;

/// Returned when the file is missing or unreadable.
pub const EMPTY_DOCUMENT: &[u8] = b"{}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("failed to write templates: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for TemplateError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}

#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored bytes, or `{}` if the file is absent or unreadable.
    pub async fn read(&self) -> Bytes {
        match fs::read(&self.path).await {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to read templates");
                }
                Bytes::from_static(EMPTY_DOCUMENT)
            }
        }
    }

    /// Validate `body` as JSON and replace the stored document.
    /// On any error the previous document is left untouched.
    pub async fn write(&self, body: &[u8]) -> Result<(), TemplateError> {
        let document: serde_json::Value = serde_json::from_slice(body)?;
        let rendered = render(&document)?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let staging = self.staging_path();
        if let Err(e) = fs::write(&staging, &rendered).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        tracing::info!(path = %self.path.display(), bytes = rendered.len(), "Templates saved");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "templates".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }
}

/// Four-space indent; non-ASCII is written as-is.
fn render(document: &serde_json::Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(out)
}
