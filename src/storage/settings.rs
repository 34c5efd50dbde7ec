//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the GAPS backend
    pub server_url: String,
    /// UI theme: "dark" or "light"
    pub theme: String,
    /// Font size: "small", "medium", or "large"
    pub font_size: String,
    /// Apply AI directives immediately instead of rendering suggestion cards
    #[serde(default)]
    pub auto_apply_suggestions: bool,
    /// Skip the delete confirmation dialog ("don't ask again")
    #[serde(default)]
    pub skip_delete_confirm: bool,
    /// Board to reopen on startup
    #[serde(default)]
    pub last_board_id: Option<String>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            theme: "dark".to_string(),
            font_size: "medium".to_string(),
            auto_apply_suggestions: false,
            skip_delete_confirm: false,
            last_board_id: None,
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures enumerated fields hold known values and the server URL is
    /// usable as a request base.
    pub fn validate(&mut self) {
        let trimmed = self.server_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            self.server_url = default_server_url();
        } else if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            self.server_url = format!("http://{trimmed}");
        } else {
            self.server_url = trimmed.to_string();
        }

        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }

        if !["small", "medium", "large"].contains(&self.font_size.as_str()) {
            self.font_size = "medium".to_string();
        }

        if let Some(id) = &self.last_board_id {
            if id.trim().is_empty() {
                self.last_board_id = None;
            }
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;
    save_settings_to(&path, settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.server_url, "http://127.0.0.1:5000");
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.font_size, "medium");
        assert!(!settings.auto_apply_suggestions);
        assert!(!settings.skip_delete_confirm);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AppSettings::default();

        settings.server_url = "  gaps.example.org/ ".to_string();
        settings.validate();
        assert_eq!(settings.server_url, "http://gaps.example.org");

        settings.server_url = "https://gaps.example.org///".to_string();
        settings.validate();
        assert_eq!(settings.server_url, "https://gaps.example.org");

        settings.server_url = String::new();
        settings.validate();
        assert_eq!(settings.server_url, "http://127.0.0.1:5000");

        settings.theme = "invalid".to_string();
        settings.validate();
        assert_eq!(settings.theme, "dark");

        settings.font_size = "huge".to_string();
        settings.validate();
        assert_eq!(settings.font_size, "medium");

        settings.last_board_id = Some("   ".to_string());
        settings.validate();
        assert_eq!(settings.last_board_id, None);
    }

    #[test]
    fn test_settings_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.last_board_id = Some("7".to_string());
        settings.skip_delete_confirm = true;

        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded.last_board_id.as_deref(), Some("7"));
        assert!(loaded.skip_delete_confirm);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded.theme, "dark");
    }
}
