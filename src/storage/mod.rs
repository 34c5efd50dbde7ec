//! Persistent storage
//!
//! This module handles local persistence: settings, cached conversations,
//! and chat panel state. Board and thought data stay on the backend; only
//! client-side state lives here.

pub mod conversations;
pub mod panel;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Could not determine application data directory")]
    NoDataDir,
}

/// Get the application data directory, creating nothing.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "gapsboard", "gapsboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

/// Flatten an opaque id into a filesystem-safe file stem.
///
/// Board ids are either small integers or UUIDs, but they come from the
/// network, so anything outside `[A-Za-z0-9_-]` becomes `_`.
pub(crate) fn sanitize_file_stem(id: &str) -> String {
    let mut out: String = id
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("42"), "42");
        assert_eq!(
            sanitize_file_stem("1c9e7b4a-0000-4000-8000-000000000000"),
            "1c9e7b4a-0000-4000-8000-000000000000"
        );
        assert_eq!(sanitize_file_stem("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_file_stem("  "), "_");
    }
}
