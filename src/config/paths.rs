//! Path management for Pennywise
//!
//! Provides XDG-compliant path resolution for configuration and per-user data.
//!
//! ## Path Resolution Order
//!
//! 1. `PENNYWISE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pennywise` or `~/.config/pennywise`
//! 3. Windows: `%APPDATA%\pennywise`
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json
//! <base>/users/<user>/transactions.json
//! <base>/users/<user>/deleted_transactions.json
//! <base>/users/<user>/audit.log
//! <base>/users/<user>/settings/{budget,warning,transaction_types}.json
//! ```

use std::path::PathBuf;

use crate::error::PennywiseError;
use crate::models::UserId;

/// Manages the application-wide paths used by Pennywise
#[derive(Debug, Clone)]
pub struct PennywisePaths {
    /// Base directory for all Pennywise data
    base_dir: PathBuf,
}

impl PennywisePaths {
    /// Create a new PennywisePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PennywiseError> {
        let base_dir = if let Ok(custom) = std::env::var("PENNYWISE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PennywisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/pennywise/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory holding one subdirectory per user
    pub fn users_dir(&self) -> PathBuf {
        self.base_dir.join("users")
    }

    /// Paths for a single user's data tree
    pub fn for_user(&self, user: &UserId) -> UserPaths {
        UserPaths {
            root: self.users_dir().join(user.as_str()),
        }
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PennywiseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PennywiseError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }

    /// Check if Pennywise has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Paths inside a single user's data directory
#[derive(Debug, Clone)]
pub struct UserPaths {
    root: PathBuf,
}

impl UserPaths {
    /// Root of this user's data
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Directory holding the settings documents
    pub fn settings_dir(&self) -> PathBuf {
        self.root.join("settings")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.root.join("transactions.json")
    }

    pub fn deleted_transactions_file(&self) -> PathBuf {
        self.root.join("deleted_transactions.json")
    }

    pub fn budget_file(&self) -> PathBuf {
        self.settings_dir().join("budget.json")
    }

    pub fn warning_file(&self) -> PathBuf {
        self.settings_dir().join("warning.json")
    }

    pub fn transaction_types_file(&self) -> PathBuf {
        self.settings_dir().join("transaction_types.json")
    }

    /// Get the path to this user's audit log
    pub fn audit_log(&self) -> PathBuf {
        self.root.join("audit.log")
    }

    /// Ensure the user directories exist
    pub fn ensure_directories(&self) -> Result<(), PennywiseError> {
        std::fs::create_dir_all(self.settings_dir())
            .map_err(|e| PennywiseError::Io(format!("Failed to create user directory: {}", e)))?;
        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PennywiseError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("pennywise"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| PennywiseError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("pennywise"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PennywiseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PennywiseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("pennywise"))
}
