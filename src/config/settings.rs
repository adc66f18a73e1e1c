//! Application settings for Pennywise
//!
//! Stored in `config.json` at the base directory. Per-user budget and warning
//! configuration lives in the user's settings documents, not here.

use serde::{Deserialize, Serialize};

use super::paths::PennywisePaths;
use crate::error::PennywiseError;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User whose data the CLI and TUI operate on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_user: Option<String>,

    /// How long backspace must be held before it clears the keypad
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,

    /// Filter directive for diagnostic logging (overridden by `PENNYWISE_LOG`)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_long_press_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            active_user: None,
            long_press_ms: default_long_press_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PennywisePaths) -> Result<Self, PennywiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PennywiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PennywiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PennywisePaths) -> Result<(), PennywiseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PennywiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            PennywiseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
