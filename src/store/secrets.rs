//! Reads one `KEY=value` entry from a dotenv-style file.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use tokio::fs;

/// Body of `GET /api/env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvResponse {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SecretReader {
    path: PathBuf,
    var: String,
}

impl SecretReader {
    pub fn new(path: impl Into<PathBuf>, var: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            var: var.into(),
        }
    }

    /// Current value, re-read on every call. Any failure reads as `None`.
    pub async fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => find_value(&content, &self.var),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read env file");
                None
            }
        }
    }
}

/// Value of the first `var=` line, trimmed, surrounding quotes removed.
pub fn find_value(content: &str, var: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix(var)?.strip_prefix('=')?;
        Some(value.trim().trim_matches('"').trim_matches('\'').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value() {
        let content = "# comment\nOTHER=1\n  GEMINI_API_KEY = x\nGEMINI_API_KEY=\"abc=def\"\n";
        // "GEMINI_API_KEY = x" has a space before '=' and does not match
        assert_eq!(find_value(content, "GEMINI_API_KEY").as_deref(), Some("abc=def"));
    }

    #[test]
    fn test_quotes_stripped() {
        assert_eq!(find_value("K='v1'", "K").as_deref(), Some("v1"));
        assert_eq!(find_value("K=  \"v2\"  ", "K").as_deref(), Some("v2"));
        assert_eq!(find_value("K=\"'v3'\"", "K").as_deref(), Some("v3"));
        assert_eq!(find_value("K=", "K").as_deref(), Some(""));
    }

    #[test]
    fn test_prefix_must_be_whole_name() {
        assert_eq!(find_value("KEY_2=x", "KEY"), None);
        assert_eq!(find_value("", "KEY"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let reader = SecretReader::new("/nonexistent/llm-devhost/.env", "GEMINI_API_KEY");
        assert_eq!(reader.read().await, None);
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_string(&EnvResponse { api_key: None }).unwrap();
        assert_eq!(body, r#"{"apiKey":null}"#);
        let body = serde_json::to_string(&EnvResponse { api_key: Some("k".into()) }).unwrap();
        assert_eq!(body, r#"{"apiKey":"k"}"#);
    }
}
