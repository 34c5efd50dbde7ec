//! Conversation cache
//!
//! Caches the interactive-mode conversation per board so reopening the chat
//! panel restores the transcript without replaying the backend exchange.

use crate::storage::{get_data_dir, sanitize_file_stem, StorageError};
use crate::types::message::ChatMessage;
use std::fs;
use std::path::{Path, PathBuf};

fn conversation_path(board_id: &str) -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?
        .join("conversations")
        .join(format!("{}.json", sanitize_file_stem(board_id))))
}

/// Load the cached conversation for a board.
///
/// A missing or corrupt cache yields an empty transcript; the cache is a
/// convenience, never a source of truth.
pub fn load_conversation(board_id: &str) -> Vec<ChatMessage> {
    match conversation_path(board_id).and_then(|path| load_from(&path)) {
        Ok(messages) => messages,
        Err(e) => {
            tracing::warn!("Failed to load conversation cache for board {board_id}: {e}");
            Vec::new()
        }
    }
}

fn load_from(path: &Path) -> Result<Vec<ChatMessage>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Save the conversation for a board.
pub fn save_conversation(board_id: &str, messages: &[ChatMessage]) -> Result<(), StorageError> {
    let path = conversation_path(board_id)?;
    save_to(&path, messages)
}

fn save_to(path: &Path, messages: &[ChatMessage]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(messages)?;
    fs::write(path, json)?;
    tracing::debug!("Saved conversation cache ({} turns)", messages.len());
    Ok(())
}

/// Drop the cached conversation for a board (conversation reset).
pub fn clear_conversation(board_id: &str) -> Result<(), StorageError> {
    let path = conversation_path(board_id)?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::ChatRole;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations").join("7.json");

        let messages = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi, what are we working on?"),
        ];
        save_to(&path, &messages).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].role, ChatRole::User);
        assert_eq!(loaded[1].content, "hi, what are we working on?");
    }

    #[test]
    fn test_missing_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_from(&path).is_err());
    }
}
