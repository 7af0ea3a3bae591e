//! Wire contract for the remote file service.
//!
//! Defines the request/response payloads for every endpoint skiff talks to,
//! plus the error taxonomy used across the client and worker layers.
//!
//! The service reports logic failures in-band (an `error` field in an
//! otherwise well-formed response); transport failures never carry
//! information about partial server-side effect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file or directory record for one directory level, exactly as the
/// service returns it. `size` is meaningful only for files.
///
/// Entries are immutable once received; a directory load replaces the whole
/// set, never individual records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteEntry {
    pub name: String,
    pub is_dir: bool,
    #[serde(default)]
    pub size: u64,
}

impl RemoteEntry {
    pub fn file(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            is_dir: false,
            size,
        }
    }

    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: true,
            size: 0,
        }
    }
}

/// Failure classes for a single backend call.
///
/// No retry happens at any layer; callers surface the message and move on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure or an unparseable response body.
    #[error("connection error: {0}")]
    Transport(String),
    /// A structured error reported by the service, passed through verbatim.
    #[error("{0}")]
    Backend(String),
}

/// Raw `list` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub current_path: String,
    #[serde(default)]
    pub entries: Vec<RemoteEntry>,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body shared by create/rename/delete.
#[derive(Debug, Clone, Deserialize)]
pub struct OpResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Batch delete reports independent success and failure sub-lists; partial
/// success is a normal outcome, not an error state.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchDeleteResponse {
    #[serde(default)]
    pub deleted: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Raw `upload` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub uploaded: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One file handed to `upload`, regardless of whether it came from the
/// picker prompt or from a host drop event.
#[derive(Debug, Clone)]
pub struct UploadBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A directory listing accepted into navigation state.
#[derive(Debug, Clone)]
pub struct Listing {
    pub current_path: String,
    pub entries: Vec<RemoteEntry>,
    pub is_root: bool,
}

/// The service expects "." for the root directory on the wire, while the
/// client state uses "" internally.
pub fn wire_path(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_parses_full_payload() -> Result<(), Box<dyn std::error::Error>> {
        let body = r#"{
            "current_path": "models/loras",
            "entries": [
                {"name": "style.safetensors", "is_dir": false, "size": 151060480},
                {"name": "archive", "is_dir": true}
            ],
            "is_root": false
        }"#;
        let resp: ListResponse = serde_json::from_str(body)?;
        assert_eq!(resp.current_path, "models/loras");
        assert_eq!(resp.entries.len(), 2);
        assert_eq!(resp.entries[0].size, 151060480);
        assert!(resp.entries[1].is_dir);
        assert_eq!(resp.entries[1].size, 0, "missing size defaults to 0");
        assert!(!resp.is_root);
        assert!(resp.error.is_none());
        Ok(())
    }

    #[test]
    fn list_response_parses_error_payload() -> Result<(), Box<dyn std::error::Error>> {
        let resp: ListResponse = serde_json::from_str(r#"{"error": "permission denied"}"#)?;
        assert_eq!(resp.error.as_deref(), Some("permission denied"));
        assert!(resp.entries.is_empty());
        Ok(())
    }

    #[test]
    fn batch_delete_response_keeps_both_lists() -> Result<(), Box<dyn std::error::Error>> {
        let body = r#"{"deleted": ["a", "b"], "errors": ["c: in use"]}"#;
        let resp: BatchDeleteResponse = serde_json::from_str(body)?;
        assert_eq!(resp.deleted, vec!["a", "b"]);
        assert_eq!(resp.errors, vec!["c: in use"]);
        Ok(())
    }

    #[test]
    fn wire_path_maps_root() {
        assert_eq!(wire_path(""), ".");
        assert_eq!(wire_path("models"), "models");
    }

    #[test]
    fn api_error_display() {
        let t = ApiError::Transport("timed out".into());
        assert_eq!(t.to_string(), "connection error: timed out");
        let b = ApiError::Backend("name already exists".into());
        assert_eq!(b.to_string(), "name already exists");
    }
}
