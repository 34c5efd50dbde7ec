//! Chat panel state
//!
//! Persists whether the interactive-mode panel was open or minimized so it
//! comes back the same way after a restart.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    #[serde(default)]
    pub chat_open: bool,
    #[serde(default)]
    pub chat_minimized: bool,
}

fn panel_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("panel.json"))
}

pub fn load_panel_state() -> PanelState {
    match panel_path().and_then(|path| load_from(&path)) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Failed to load panel state, using defaults: {e}");
            PanelState::default()
        }
    }
}

fn load_from(path: &Path) -> Result<PanelState, StorageError> {
    if !path.exists() {
        return Ok(PanelState::default());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_panel_state(state: PanelState) -> Result<(), StorageError> {
    let path = panel_path()?;
    save_to(&path, state)
}

fn save_to(path: &Path, state: PanelState) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&state)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");

        let state = PanelState {
            chat_open: true,
            chat_minimized: true,
        };
        save_to(&path, state).unwrap();
        assert_eq!(load_from(&path).unwrap(), state);
    }

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_from(&dir.path().join("panel.json")).unwrap();
        assert!(!state.chat_open);
        assert!(!state.chat_minimized);
    }
}
